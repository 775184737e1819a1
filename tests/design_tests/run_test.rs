use apidesign::{
    eval, EvalError, EvalResult, Expression, ExpressionSet, ResultTypeExpr, Root, RootExpr,
    SetWalker, Stage, ValidationErrors,
};
use pretty_assertions::assert_eq;

use super::calc_design;

/// Result types derived from the design, evaluated after it.
struct GeneratedRoot {
    types: Vec<ResultTypeExpr>,
}

impl Root for GeneratedRoot {
    fn eval_name(&self) -> &str {
        "generated result types"
    }

    fn depends_on(&self) -> Vec<String> {
        vec!["design".to_string()]
    }

    fn walk_sets(&mut self, walk: &mut SetWalker<'_>) -> EvalResult<()> {
        walk(ExpressionSet::new(
            Stage::ResultTypes,
            self.types.iter().map(Expression::ResultType).collect(),
        ))
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for t in self.types.iter().filter(|t| t.identifier.is_empty()) {
            errors.add(t, "Missing identifier");
        }
        errors
    }
}

#[test]
fn test_design_runs_before_generated_types() {
    let mut design = calc_design();
    let mut generated = GeneratedRoot {
        types: vec![ResultTypeExpr::new("Collection", "application/vnd.calc.sum; type=collection")],
    };

    let mut trace = Vec::new();
    let mut roots: [&mut dyn Root; 2] = [&mut generated, &mut design];
    eval::run(&mut roots, &mut |set| {
        trace.push((set.stage, set.len()));
        Ok(())
    })
    .unwrap();

    assert_eq!(trace.len(), 11);
    assert_eq!(trace.first(), Some(&(Stage::Api, 1)));
    assert_eq!(trace.last(), Some(&(Stage::ResultTypes, 1)));
}

#[test]
fn test_validation_failures_of_all_roots_are_reported() {
    let mut design = RootExpr::new();
    let mut generated = GeneratedRoot {
        types: vec![ResultTypeExpr::new("Broken", "")],
    };
    let mut roots: [&mut dyn Root; 2] = [&mut design, &mut generated];

    let err = eval::run(&mut roots, &mut |_| Ok(())).unwrap_err();
    match err {
        EvalError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.to_string(),
                "result type \"Broken\": Missing identifier"
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_failing_batch_stops_the_run() {
    let mut design = calc_design();
    let mut generated = GeneratedRoot { types: vec![] };
    let mut roots: [&mut dyn Root; 2] = [&mut design, &mut generated];

    let mut stages = Vec::new();
    let err = eval::run(&mut roots, &mut |set| {
        stages.push(set.stage);
        match set.stage {
            Stage::Methods => Err(EvalError::stage(set.stage, "unknown payload type")),
            _ => Ok(()),
        }
    })
    .unwrap_err();

    assert_eq!(stages.len(), 5);
    assert!(matches!(err, EvalError::Stage { stage: Stage::Methods, .. }));
}
