use super::Analyzer;
use crate::bound::BoundDocument;
use crate::events::is_known_event;
use actionflow_syntax::DiagnosticBag;
use once_cell::sync::Lazy;
use regex::Regex;

const RESERVED_ENV_PREFIX: &str = "GITHUB_";

/// `docker://[registry/]path[:tag|@digest]`, `./local/path` or
/// `owner/repo[/path]@ref`.
static USES: Lazy<Regex> = Lazy::new(|| {
    let alpha_num = "[a-zA-Z0-9]";
    let alpha_num_dash = "[a-zA-Z0-9-]";

    let host_component = format!("({an}|({an}{and}*{an}))", an = alpha_num, and = alpha_num_dash);
    let registry = format!(r"({host}(\.{host})*(:[0-9]+)?/)", host = host_component);
    let path_component = format!("({an}+([._-]{an}+)*)", an = alpha_num);
    let tag = "(:[a-zA-Z0-9_][a-zA-Z0-9_.-]*)";
    let digest = format!(
        "(@[A-Za-z]{an}*([+._-][A-Za-z]{an}*)*:[a-fA-F0-9]+)",
        an = alpha_num
    );
    let docker = format!(
        "docker://{registry}?{path}(/{path})*({tag}|{digest})?",
        path = path_component
    );

    let local = r"\./.*";

    let owner = format!("{an}+({and}{an}+)*", an = alpha_num, and = alpha_num_dash);
    let remote = format!(r"{owner}(/[a-zA-Z0-9_.\-]+)+@.+");

    Regex::new(&format!("^(?:{docker}|{local}|{remote})$")).expect("Valid regex pattern for uses")
});

fn is_valid_uses(value: &str) -> bool {
    USES.is_match(value)
}

/// Checks property values that have a fixed format.
#[derive(Debug, Default)]
pub struct ValuesAnalyzer;

impl Analyzer for ValuesAnalyzer {
    fn analyze(&mut self, document: &BoundDocument, bag: &mut DiagnosticBag) {
        for workflow in &document.workflows {
            if let Some(on) = workflow.on.as_ref().and_then(|p| p.value.as_ref())
                && !is_known_event(&on.value)
            {
                bag.unrecognized_event(&on.value, on.span());
            }
        }

        for action in &document.actions {
            if let Some(uses) = action.uses.as_ref().and_then(|p| p.value.as_ref())
                && !is_valid_uses(&uses.value)
            {
                bag.invalid_uses(uses.span());
            }

            for member in action.env() {
                if member.name.starts_with(RESERVED_ENV_PREFIX) {
                    bag.reserved_environment_variable(member.syntax.name.span);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_uses() {
        assert!(is_valid_uses("./ci"));
        assert!(is_valid_uses("./"));
        assert!(!is_valid_uses("ci"));
        assert!(!is_valid_uses("../ci"));
    }

    #[test]
    fn test_docker_uses() {
        assert!(is_valid_uses("docker://alpine"));
        assert!(is_valid_uses("docker://alpine:3.8"));
        assert!(is_valid_uses("docker://gcr.io/cloud-builders/gcloud"));
        assert!(is_valid_uses("docker://localhost:5000/team/image:latest"));
        assert!(is_valid_uses("docker://alpine@sha256:deadbeef"));
        assert!(!is_valid_uses("docker://"));
        assert!(!is_valid_uses("docker://Alpine:"));
    }

    #[test]
    fn test_remote_uses() {
        assert!(is_valid_uses("actions/bin/filter@master"));
        assert!(is_valid_uses("actions/docker/cli@76ff57a"));
        assert!(is_valid_uses("owner/repo@v1"));
        assert!(!is_valid_uses("owner/repo"));
        assert!(!is_valid_uses("owner@v1"));
        assert!(!is_valid_uses("-owner/repo@v1"));
    }

    #[test]
    fn test_uses_pattern_compiles() {
        let pattern = Lazy::force(&USES);
        assert!(pattern.as_str().starts_with("^(?:docker://"));
    }
}
