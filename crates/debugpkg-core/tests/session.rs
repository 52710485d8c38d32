//! Tests for scripted sessions

mod common;

use std::sync::Arc;

use common::{engine, text, FakeDatabase, FakeProvider};
use debugpkg_core::engine::UnavailableSuggestions;
use debugpkg_core::error::SuggestError;
use debugpkg_core::events::SessionEvent;
use debugpkg_core::session::Session;
use debugpkg_core::settings::{ResolutionMode, Settings};
use pretty_assertions::assert_eq;

const FOO_PROVIDES: &str = "foo-debuginfo-1.0 : Debug information for package foo\n";
const FOO_DEBUG_PATH: &str = "/usr/lib/debug/.build-id/ab/cdef1234567890";

fn session(provider: &Arc<FakeProvider>) -> Session
{
    Session::new(Settings::default(), Box::new(engine(FakeDatabase::default(), provider)))
}

fn run(session: &mut Session, script: &str) -> String
{
    let mut out = Vec::new();
    for line in script.lines() {
        session.run_line(line, &mut out).unwrap();
    }
    text(&out)
}

#[test]
fn test_script_slow_mode_end_to_end()
{
    let provider = Arc::new(FakeProvider::default().providing(FOO_DEBUG_PATH, FOO_PROVIDES));
    let mut session = session(&provider);

    let output = run(
        &mut session,
        "\
# resolve build-ids to packages
set suggestions.mode slow
missing-file abcdef1234567890 /usr/lib64/libfoo.so
missing-file abcdef1234567890 /usr/lib64/libfoo.so
prompt
exec-changed reload
show-suggestions
",
    );

    assert_eq!(
        output,
        "Missing rpms, try: dnf --enablerepo='*debug*' install foo-1.0 foo-debuginfo-1.0\n\
         Missing rpms, try: dnf --enablerepo='*debug*' install foo-1.0 foo-debuginfo-1.0\n"
    );
    assert_eq!(provider.calls(), 1);
    assert_eq!(session.settings().mode, ResolutionMode::Slow);
}

#[test]
fn test_script_executable_change_clears_suggestions()
{
    let provider = Arc::new(FakeProvider::default());
    let mut session = session(&provider);

    let output = run(
        &mut session,
        "missing-file abcdef1234567890\nexec-changed\nprompt\nshow-suggestions\n",
    );
    assert_eq!(output, "No package suggestions have been made so far.\n");
}

#[test]
fn test_show_setting()
{
    let provider = Arc::new(FakeProvider::default());
    let mut session = session(&provider);
    let output = run(&mut session, "set suggestions.enabled off\nshow suggestions.enabled\n");
    assert_eq!(output, "suggestions.enabled is \"off\".\n");
}

#[test]
fn test_bad_command_changes_nothing()
{
    let provider = Arc::new(FakeProvider::default());
    let mut session = session(&provider);
    let mut out = Vec::new();

    let err = session.run_line("show-suggestions now", &mut out).unwrap_err();
    assert_eq!(err.to_string(), "unexpected arguments: now");

    assert!(session.run_line("set suggestions.mode sideways", &mut out).is_err());
    assert_eq!(session.settings(), &Settings::default());
    assert!(out.is_empty());
}

#[test]
fn test_detection_handlers_report_not_handled()
{
    let provider = Arc::new(FakeProvider::default());
    let mut session = session(&provider);
    let mut out = Vec::new();

    let event = SessionEvent::MissingDebugInfo {
        objfile: "/usr/bin/true".to_string(),
    };
    assert!(!session.handle_event(&event, &mut out).unwrap());
}

#[test]
fn test_unavailable_capability()
{
    let mut session = Session::new(Settings::default(), Box::new(UnavailableSuggestions::new()));
    let mut out = Vec::new();

    session.run_line("missing-file abcdef1234567890", &mut out).unwrap();
    session.run_line("prompt", &mut out).unwrap();
    session.run_line("prompt", &mut out).unwrap();
    assert_eq!(text(&out).matches("Unable to query the rpm package database").count(), 1);

    let err = session.run_line("show-suggestions", &mut out).unwrap_err();
    assert!(matches!(err, SuggestError::CapabilityUnavailable(_)));

    // Settings still work without the capability.
    session.run_line("set suggestions.mode slow", &mut out).unwrap();
    assert_eq!(session.settings().mode, ResolutionMode::Slow);
}
