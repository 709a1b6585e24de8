/*
[INPUT]:  Parsed CLI subcommands
[OUTPUT]: Interactive init and sign-in flows
[POS]:    CLI layer - module wiring
[UPDATE]: When adding CLI subcommands
*/

pub mod init;
pub mod sign_in;
