use clap::{value_parser, Arg, ArgAction, Command};

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Log requests to stderr, response bodies need RUST_LOG=bookfinder=trace")
}

pub fn arg_parser() -> Command {
    Command::new("bookfinder")
        .about("Search the OpenLibrary catalog")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("search")
                .about("Search for books by title, author or anything else")
                .arg(Arg::new("terms").num_args(0..))
                .arg(verbose_arg()),
        )
        .subcommand(
            Command::new("show")
                .about("Show the details of a book by its catalog key")
                .arg(Arg::new("key").required(true))
                .arg(verbose_arg()),
        )
        .subcommand(
            Command::new("open")
                .about("Show the details of an entry of the last result list")
                .arg(
                    Arg::new("position")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(Command::new("pick").about("Choose an entry of the last result list"))
        .subcommand(Command::new("exit").about("Leave the repl"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser()
        .subcommand(
            Command::new("repl")
                .about("Launch a read eval print loop")
                .arg(verbose_arg()),
        )
        .subcommand(Command::new("config").about("Print the default configuration"))
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser();
    fn add_command(parent_fn_name: &str, cmd: &Command, subcmds: &mut Vec<String>) {
        let fn_name = format!(
            "{parent_fn_name} {cmd_name}",
            parent_fn_name = parent_fn_name,
            cmd_name = cmd.get_name()
        )
        .trim()
        .to_string();
        subcmds.push(fn_name.clone());
        for subcmd in cmd.get_subcommands() {
            add_command(&fn_name, subcmd, subcmds);
        }
    }
    let mut subcmds = vec![];
    for subcmd in cmd.get_subcommands() {
        add_command("", subcmd, &mut subcmds);
    }
    subcmds.sort();
    subcmds
}
