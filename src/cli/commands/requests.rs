use clap::{Arg, Command};

pub fn with_commands(command: Command) -> Command {
    command.subcommand(
        Command::new("requests")
            .about("Diagnosis requests (patient view)")
            .subcommand_required(true)
            .subcommand(Command::new("list").about("List your diagnosis requests"))
            .subcommand(
                Command::new("submit")
                    .about("Submit a new diagnosis request")
                    .arg(
                        Arg::new("image")
                            .short('i')
                            .long("image")
                            .help("Path to the image to analyze")
                            .required(true),
                    ),
            )
            .subcommand(
                Command::new("show")
                    .about("Show one diagnosis request")
                    .arg(
                        Arg::new("id")
                            .long("id")
                            .help("Diagnosis request id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
            ),
    )
}
