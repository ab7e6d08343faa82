use console::style;

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = money_cli::args::parse();
    // Failures end the command with a flat error report; the exit code does
    // not distinguish failure kinds.
    if let Err(error) = money_cli::cli::main(args).await {
        println!("{} {:#}", style("ERROR").red(), error);
    }
}
