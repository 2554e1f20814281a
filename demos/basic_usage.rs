use problem_details::{APPLICATION_PROBLEM_JSON, Problem, Result};

fn withdraw(balance: u64, cost: u64) -> Result<u64> {
    if cost > balance {
        return Err(Problem::new(
            "You do not have enough credit.",
            format!("Your current balance is {balance}, but that costs {cost}."),
            403,
        )
        .with_type("https://example.com/probs/out-of-credit")
        .with_instance("/account/12345/msgs/abc"));
    }
    Ok(balance - cost)
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    match withdraw(30, 50) {
        Ok(left) => println!("Success! {left} left"),
        Err(problem) => {
            // SCENARIO 1: The API client
            // They receive the RFC 7807 document and the status code.
            println!("1. [HTTP RESPONSE] What the client receives:");
            println!("   Status:       {}", problem.status());
            println!("   Content-Type: {APPLICATION_PROBLEM_JSON}");
            match serde_json::to_string_pretty(&problem) {
                Ok(body) => println!("{body}"),
                Err(e) => eprintln!("   failed to encode body: {e}"),
            }

            // SCENARIO 2: The operator
            // They see the error message carried by the cause.
            println!("\n2. [ERROR MESSAGE] What the operator sees:");
            println!("   {problem}");
        }
    }
}
