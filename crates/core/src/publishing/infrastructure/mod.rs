pub mod command_runner;
pub mod gh_cli_publisher;
