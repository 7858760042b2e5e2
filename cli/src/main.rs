mod commands;
mod terminal;

use commands::{CommandLine, Commands, contains, host, info, mask, sort};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    let options = commands.parse_options();
    let q_level = commands.quiet;
    print::banner(q_level);

    let result = match commands.command {
        Commands::Info { address } => {
            print::header("address information", q_level);
            info::info(&address, &options)
        }
        Commands::Mask { address, mask, or, strict } => {
            print::header("masking", q_level);
            mask::mask(&address, &mask, or, strict, &options)
        }
        Commands::Sort { inputs, order } => {
            print::header("sorted addresses", q_level);
            sort::sort(inputs, order, &options)
        }
        Commands::Contains { container, addresses } => {
            print::header("containment", q_level);
            contains::contains(&container, &addresses, &options)
        }
        Commands::Host { host, resolve } => {
            print::header("host", q_level);
            host::host(&host, resolve, &options)
        }
    };

    if q_level == 0 {
        print::fat_separator();
    }
    result
}
