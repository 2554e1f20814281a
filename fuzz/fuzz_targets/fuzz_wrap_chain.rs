#![no_main]

use libfuzzer_sys::fuzz_target;
use problem_details::{as_problem, with_message, with_stack, wrap, BoxError, Problem};

fuzz_target!(|input: (String, String, u16, Vec<(u8, String)>)| {
    let (title, detail, status, steps) = input;

    let mut err: Option<BoxError> = Some(Box::new(Problem::new(title.clone(), detail.clone(), status)));
    for (kind, message) in steps.into_iter().take(32) {
        err = match kind % 3 {
            0 => wrap(err, message),
            1 => with_stack(err),
            _ => with_message(err, message),
        };
    }

    let err = err.expect("annotating an error never drops it");
    let problem = as_problem(&*err).expect("problem survives annotation");
    assert_eq!(problem.title(), title);
    assert_eq!(problem.detail(), detail);
    assert_eq!(problem.status(), status);

    let mut line = String::new();
    problem.log().write_to(&mut line).expect("writing to a String never fails");
});
