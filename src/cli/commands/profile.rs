use clap::{Arg, Command};

pub fn with_commands(command: Command) -> Command {
    command.subcommand(
        Command::new("profile")
            .about("Your profile")
            .subcommand_required(true)
            .subcommand(Command::new("show").about("Show your profile"))
            .subcommand(
                Command::new("update")
                    .about("Update profile fields")
                    .arg(Arg::new("username").long("username").help("New username"))
                    .arg(Arg::new("email").long("email").help("New email address"))
                    .arg(
                        Arg::new("first-name")
                            .long("first-name")
                            .help("New first name"),
                    )
                    .arg(
                        Arg::new("last-name")
                            .long("last-name")
                            .help("New last name"),
                    ),
            ),
    )
}
