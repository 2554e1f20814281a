use problem_details::Problem;

fn main() {
    println!("--- Logging Example ---\n");

    let problem = Problem::new("Bad Gateway", "upstream refused connection", 502)
        .with_type("https://example.com/probs/upstream")
        .wrap("calling billing service")
        .with_message("settling invoice 88");

    // Single structured line, as a log shipper would receive it.
    problem.with_log(|log| {
        let mut line = String::new();
        if log.write_to(&mut line).is_ok() {
            println!("{line}");
        }
    });

    // Field by field, for structured loggers.
    let log = problem.log();
    println!("\nstatus = {}", log.status());
    println!("title  = {}", log.title());
    println!("detail = {}", log.detail());
    println!("cause  = {}", log.cause());
    for (depth, source) in log.sources().iter().enumerate() {
        println!("source[{depth}] = {source}");
    }
}
