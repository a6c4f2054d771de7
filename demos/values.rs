use flagpole::{CliOption, CommandLineParser, Scan};

fn main() {
    let mut boolean = CliOption::switch(["b", "boolean"], false, "Set a boolean flag.");
    let mut string = CliOption::value(["s", "string"], "", "Set a flag to value.");
    let mut help = CliOption::help_option();

    let mut parser = CommandLineParser::new("values")
        .add_option(&mut boolean)
        .add_option(&mut string)
        .add_option(&mut help);

    if let Scan::Stopped { .. } = parser.run_env() {
        return;
    }

    let arguments = parser.into_arguments();
    println!("boolean: {}", boolean.as_bool());
    println!("string: {}", string.as_string());
    println!("arguments: {arguments:?}");
}
