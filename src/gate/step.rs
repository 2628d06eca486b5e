use crate::error::Result;
use crate::ui;

use super::ReleaseContext;

/// One named check of a gate.
pub struct Step<G> {
    pub name: &'static str,
    pub check: fn(&G, &ReleaseContext) -> Result<()>,
}

impl<G> Step<G> {
    pub fn new(name: &'static str, check: fn(&G, &ReleaseContext) -> Result<()>) -> Self {
        Step { name, check }
    }
}

/// Runs `steps` in order and stops at the first failure.
///
/// Returns the names of the steps that passed. The failing step's error is
/// returned unchanged; later steps are never run.
pub fn run_steps<G>(
    gate: &G,
    ctx: &ReleaseContext,
    steps: &[Step<G>],
) -> Result<Vec<&'static str>> {
    let mut passed = Vec::with_capacity(steps.len());

    for step in steps {
        tracing::debug!(step = step.name, tag = %ctx.version.tag(), "running check");
        if let Err(e) = (step.check)(gate, ctx) {
            tracing::warn!(step = step.name, kind = e.kind(), "check failed");
            return Err(e);
        }
        ui::display_success(step.name);
        passed.push(step.name);
    }

    Ok(passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReleaseVersion;
    use crate::error::ReleaseError;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct Recorder {
        seen: RefCell<Vec<&'static str>>,
    }

    fn ctx() -> ReleaseContext {
        ReleaseContext {
            version: ReleaseVersion::from_tag("v1.0.0").unwrap(),
            tag_commit: "aaa".to_string(),
            floating_commit: "aaa".to_string(),
            release_dir: PathBuf::from("releases/v1.0.0"),
        }
    }

    fn first(r: &Recorder, _: &ReleaseContext) -> Result<()> {
        r.seen.borrow_mut().push("first");
        Ok(())
    }

    fn failing(r: &Recorder, _: &ReleaseContext) -> Result<()> {
        r.seen.borrow_mut().push("failing");
        Err(ReleaseError::validation("nope"))
    }

    fn last(r: &Recorder, _: &ReleaseContext) -> Result<()> {
        r.seen.borrow_mut().push("last");
        Ok(())
    }

    #[test]
    fn test_stops_at_first_failure() {
        let recorder = Recorder {
            seen: RefCell::new(Vec::new()),
        };
        let steps = vec![
            Step::new("first", first),
            Step::new("failing", failing),
            Step::new("last", last),
        ];

        let err = run_steps(&recorder, &ctx(), &steps).unwrap_err();
        assert!(matches!(err, ReleaseError::Validation(_)));
        assert_eq!(*recorder.seen.borrow(), vec!["first", "failing"]);
    }

    #[test]
    fn test_all_pass_in_order() {
        let recorder = Recorder {
            seen: RefCell::new(Vec::new()),
        };
        let steps = vec![Step::new("first", first), Step::new("last", last)];

        let passed = run_steps(&recorder, &ctx(), &steps).unwrap();
        assert_eq!(passed, vec!["first", "last"]);
    }
}
