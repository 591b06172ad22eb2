use webhook_smoke::app::run_cli;

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    run_cli(&args, &mut |line| println!("{line}")).map_err(|err| err.to_string())
}

fn main() {
    if let Err(err) = run() {
        println!("{err}");
        std::process::exit(1);
    }
}
