#![cfg(test)]
mod hosts;
mod masking;
mod ordering;
mod parsing;
mod properties;
