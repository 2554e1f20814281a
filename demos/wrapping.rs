use problem_details::{BoxError, Problem, ResultExt, as_problem, with_stack};
use std::io;

fn read_order(id: u32) -> Result<String, Problem> {
    Err(Problem::new("Not Found", format!("order {id} does not exist"), 404)
        .with_instance(format!("/orders/{id}")))
}

fn handle(id: u32) -> Result<String, BoxError> {
    read_order(id).wrap_err("loading order for invoice")
}

fn main() {
    println!("--- Wrapping Example ---\n");

    let err = match handle(7) {
        Ok(order) => {
            println!("Loaded {order}");
            return;
        }
        Err(err) => err,
    };

    // A wrapped problem is still a problem.
    if let Some(problem) = as_problem(&*err) {
        println!("1. [STRUCTURED FIELDS] Unchanged by wrapping:");
        println!("   title:    {}", problem.title());
        println!("   detail:   {}", problem.detail());
        println!("   instance: {}", problem.instance());
        println!("   status:   {}", problem.status());

        println!("\n2. [ERROR CHAIN] Carries the added context:");
        println!("   {problem}");
    }

    // A plain error stays opaque.
    let plain = with_stack(Some(io::Error::other("ledger locked").into()));
    if let Some(plain) = plain {
        println!("\n3. [PLAIN ERROR] Problem? {}", as_problem(&*plain).is_some());
        println!("   {plain}");
    }

    // Rich rendering: the chain innermost first, with captured stacks.
    if let Some(problem) = as_problem(&*err) {
        println!("\n4. [RICH RENDERING]");
        println!("{problem:#}");
    }
}
