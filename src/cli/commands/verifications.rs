use clap::{Arg, Command};

pub fn with_commands(command: Command) -> Command {
    command.subcommand(
        Command::new("verifications")
            .about("Medical verifications (dermatologist view)")
            .subcommand_required(true)
            .subcommand(Command::new("list").about("List results pending verification"))
            .subcommand(
                Command::new("submit")
                    .about("Record a verification decision")
                    .arg(
                        Arg::new("result")
                            .long("result")
                            .help("Result id to verify")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    )
                    .arg(
                        Arg::new("condition")
                            .long("condition")
                            .help("Verified condition id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
            ),
    )
}
