#![no_main]

use libfuzzer_sys::fuzz_target;
use problem_details::{Problem, ProblemDocument, DEFAULT_TYPE};

fuzz_target!(|data: &[u8]| {
    let Ok(problem) = serde_json::from_slice::<Problem>(data) else {
        return;
    };

    assert!(!problem.type_uri().is_empty());
    assert_eq!(problem.to_string(), problem.detail());

    let text = serde_json::to_string(&problem).expect("problem always encodes");
    let back: Problem = serde_json::from_str(&text).expect("encoded problem decodes");
    assert_eq!(ProblemDocument::from(&back), ProblemDocument::from(&problem));

    if problem.type_uri() == DEFAULT_TYPE {
        assert!(text.contains(DEFAULT_TYPE));
    }
});
