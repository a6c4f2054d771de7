use flagpole::{ArgumentMode, CliOption, CommandLineParser, LongMatch, ScanPolicy, Unrecognized};

fn main() {
    let mut verbosity = 0;
    let mut verbose = CliOption::new(
        ["v", "verbose"],
        "",
        "Increase the verbosity (repeatable).",
        ArgumentMode::NoArgument,
        |_| {
            verbosity += 1;
            true
        },
    );
    let mut color = CliOption::with_mode(
        ["c", "color"],
        "auto",
        "Colour the output (always, never or auto).",
        ArgumentMode::ArgumentOptional,
    );
    let mut jobs = CliOption::value(["j", "jobs"], "1", "Number of jobs.");
    let mut help = CommandLineParser::help_option();

    let mut parser = CommandLineParser::new("counter")
        .policy(
            ScanPolicy::default()
                .long_match(LongMatch::Unambiguous)
                .unrecognized(Unrecognized::Reject),
        )
        .add_option(&mut verbose)
        .add_option(&mut color)
        .add_option(&mut jobs)
        .add_option(&mut help);

    parser.run_env();
    let arguments = parser.into_arguments();
    drop(verbose);

    match jobs.as_int() {
        Ok(jobs) => println!("jobs: {jobs}"),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }

    println!("verbosity: {verbosity}");
    println!("color: {}", color.as_string());
    println!("arguments: {arguments:?}");
}
