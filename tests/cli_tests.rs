//! Integration tests for argument handling and editor/namespace resolution

use kubectl_modify_secret::adapters::kube_client::{resolve_namespace, DEFAULT_NAMESPACE};
use kubectl_modify_secret::adapters::secrets::map_kube_error;
use kubectl_modify_secret::cli::{Action, BuildInfo, Cli};
use kubectl_modify_secret::session::{has_changed, ExternalEditor, Fingerprint};
use kubectl_modify_secret::transcode::Variant;
use kubectl_modify_secret::Error;

// ============================================================================
// Test Helpers
// ============================================================================

fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once("kubectl-modify-secret").chain(args.iter().copied());
    Cli::try_parse_for(Variant::Secret, argv).unwrap()
}

fn api_error(code: u16, message: &str) -> kube::Error {
    kube::Error::Api(kube::core::ErrorResponse {
        status: "Failure".to_string(),
        message: message.to_string(),
        reason: "Test".to_string(),
        code,
    })
}

// ============================================================================
// Argument Validation Tests
// ============================================================================

#[test]
fn missing_secret_name_is_rejected() {
    let err = parse(&[]).action().unwrap_err();

    assert!(matches!(err, Error::ValidationError(_)));
    assert_eq!(err.to_string(), "at least one argument is required");
}

#[test]
fn more_than_one_secret_name_is_rejected() {
    let err = parse(&["first", "second"]).action().unwrap_err();

    assert!(matches!(err, Error::ValidationError(_)));
    assert_eq!(err.to_string(), "only one argument is allowed");
}

#[test]
fn single_secret_name_is_accepted() {
    let action = parse(&["db-credentials"]).action().unwrap();

    assert_eq!(
        action,
        Action::Modify {
            name: "db-credentials".to_string()
        }
    );
}

#[test]
fn version_flag_bypasses_validation() {
    assert_eq!(parse(&["--version"]).action().unwrap(), Action::PrintVersion);
    assert_eq!(
        parse(&["a", "b", "--version"]).action().unwrap(),
        Action::PrintVersion
    );
}

#[test]
fn build_version_is_injected() {
    assert!(!BuildInfo::current().version.is_empty());
}

#[test]
fn connection_flags_are_forwarded() {
    let cli = parse(&[
        "my-secret",
        "-n",
        "payments",
        "--kubeconfig",
        "/tmp/kubeconfig",
        "--context",
        "staging",
    ]);
    let options = cli.connection_options();

    assert_eq!(options.namespace.as_deref(), Some("payments"));
    assert_eq!(options.kubeconfig.as_deref(), Some("/tmp/kubeconfig"));
    assert_eq!(options.context.as_deref(), Some("staging"));
    assert!(options.cluster.is_none());
    assert!(options.user.is_none());
}

#[test]
fn release_binary_uses_its_own_command_name() {
    let cli = Cli::try_parse_for(Variant::Release, ["kubectl-modify-release", "rel"]).unwrap();

    assert_eq!(Variant::Release.command_name(), "modify-release");
    assert_eq!(
        cli.action().unwrap(),
        Action::Modify {
            name: "rel".to_string()
        }
    );
}

#[test]
fn unknown_flag_is_a_clap_error() {
    let result = Cli::try_parse_for(Variant::Secret, ["kubectl-modify-secret", "--bogus"]);
    assert!(result.is_err());
}

// ============================================================================
// Namespace Resolution Tests
// ============================================================================

#[test]
fn namespace_flag_wins() {
    assert_eq!(resolve_namespace(Some("flag-ns"), "context-ns"), "flag-ns");
}

#[test]
fn context_namespace_is_used_without_flag() {
    assert_eq!(resolve_namespace(None, "context-ns"), "context-ns");
    assert_eq!(resolve_namespace(Some(""), "context-ns"), "context-ns");
}

#[test]
fn namespace_defaults_to_default() {
    assert_eq!(resolve_namespace(None, ""), DEFAULT_NAMESPACE);
}

// ============================================================================
// Editor Resolution Tests
// ============================================================================

#[test]
fn kube_editor_takes_precedence() {
    let editor = ExternalEditor::resolve(|var| match var {
        "KUBE_EDITOR" => Some("nano".to_string()),
        "EDITOR" => Some("emacs".to_string()),
        _ => None,
    });

    assert_eq!(editor.program(), "nano");
}

#[test]
fn blank_editor_variables_fall_through() {
    let editor = ExternalEditor::resolve(|var| match var {
        "KUBE_EDITOR" => Some("   ".to_string()),
        "EDITOR" => Some("emacs".to_string()),
        _ => None,
    });

    assert_eq!(editor.program(), "emacs");
}

#[test]
fn editor_command_arguments_are_split() {
    let editor = ExternalEditor::resolve(|var| match var {
        "EDITOR" => Some("code --wait --new-window".to_string()),
        _ => None,
    });

    assert_eq!(editor.program(), "code");
    assert_eq!(editor.args(), ["--wait", "--new-window"]);
}

#[test]
fn quoted_editor_path_with_spaces_is_one_word() {
    let editor = ExternalEditor::from_command(
        "\"/Applications/Sublime Text.app/Contents/SharedSupport/bin/subl\" -w",
    )
    .unwrap();

    assert_eq!(
        editor.program(),
        "/Applications/Sublime Text.app/Contents/SharedSupport/bin/subl"
    );
    assert_eq!(editor.args(), ["-w"]);
}

#[test]
fn single_quoted_arguments_are_grouped() {
    let editor = ExternalEditor::from_command("emacsclient -a '' --eval '(find-file x)'").unwrap();

    assert_eq!(editor.program(), "emacsclient");
    assert_eq!(editor.args(), ["-a", "", "--eval", "(find-file x)"]);
}

#[test]
fn platform_default_editor_is_used_without_environment() {
    let editor = ExternalEditor::resolve(|_| None);

    assert!(!editor.program().is_empty());
    assert!(editor.args().is_empty());
}

#[cfg(unix)]
mod external_editor {
    use kubectl_modify_secret::session::{Editor, ExternalEditor};
    use kubectl_modify_secret::Error;

    #[tokio::test]
    async fn successful_exit_is_ok() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let editor = ExternalEditor::from_command("true").unwrap();

        assert!(editor.edit(file.path()).await.is_ok());
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_editor_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let editor = ExternalEditor::from_command("false").unwrap();

        let err = editor.edit(file.path()).await.unwrap_err();
        assert!(matches!(err, Error::EditorError(_)));
    }

    #[tokio::test]
    async fn missing_program_is_an_editor_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let editor = ExternalEditor::from_command("definitely-not-an-editor-7f3a").unwrap();

        let err = editor.edit(file.path()).await.unwrap_err();
        assert!(matches!(err, Error::EditorError(_)));
    }
}

// ============================================================================
// Change Detection Tests
// ============================================================================

#[test]
fn identical_bytes_are_unchanged() {
    assert!(!has_changed(b"a: hello\n", b"a: hello\n"));
    assert_eq!(Fingerprint::of(b""), Fingerprint::of(b""));
}

#[test]
fn any_byte_difference_is_a_change() {
    assert!(has_changed(b"a: hello\n", b"a: hello \n"));
    assert!(has_changed(b"a: hello\n", b"a: hello"));
    assert!(has_changed(b"", b"\n"));
}

// ============================================================================
// API Error Classification Tests
// ============================================================================

#[test]
fn api_status_codes_map_to_store_errors() {
    assert!(matches!(
        map_kube_error(api_error(404, "not found"), "s", "ns"),
        Error::NotFound { .. }
    ));
    assert!(matches!(
        map_kube_error(api_error(409, "modified"), "s", "ns"),
        Error::ConflictError { .. }
    ));
    assert!(matches!(
        map_kube_error(api_error(403, "forbidden"), "s", "ns"),
        Error::AuthError(_)
    ));
    assert!(matches!(
        map_kube_error(api_error(401, "unauthorized"), "s", "ns"),
        Error::AuthError(_)
    ));
    assert!(matches!(
        map_kube_error(api_error(500, "boom"), "s", "ns"),
        Error::KubeError(_)
    ));
}

#[test]
fn not_found_names_the_secret() {
    let err = map_kube_error(api_error(404, "not found"), "db", "payments");
    assert_eq!(err.to_string(), "secret payments/db not found");
}
