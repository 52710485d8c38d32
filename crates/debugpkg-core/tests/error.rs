//! Tests for error handling

use debugpkg_core::error::{SuggestError, SuggestResult};

#[test]
fn test_unexpected_arguments_names_text()
{
    let error = SuggestError::UnexpectedArguments("foo bar".to_string());
    let message = format!("{}", error);
    assert!(message.contains("unexpected arguments"));
    assert!(message.contains("foo bar"));
}

#[test]
fn test_resolver_timeout_display()
{
    let error = SuggestError::ResolverTimeout {
        limit: std::time::Duration::from_secs(30),
    };
    let message = format!("{}", error);
    assert!(message.contains("timed out"));
    assert!(message.contains("30s"));
}

#[test]
fn test_resolver_timeout_keeps_sub_second_limits()
{
    let error = SuggestError::ResolverTimeout {
        limit: std::time::Duration::from_millis(300),
    };
    assert_eq!(format!("{}", error), "Package provider query timed out after 0.3s");
}

#[test]
fn test_invalid_setting_value_display()
{
    let error = SuggestError::InvalidSettingValue {
        setting: "suggestions.mode".to_string(),
        value: "turbo".to_string(),
    };
    let message = format!("{}", error);
    assert!(message.contains("suggestions.mode"));
    assert!(message.contains("turbo"));
}

#[test]
fn test_capability_unavailable_is_verbatim()
{
    let error = SuggestError::CapabilityUnavailable("no rpm here".to_string());
    assert_eq!(format!("{}", error), "no rpm here");
}

#[test]
fn test_io_error_converts()
{
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let error: SuggestError = io.into();
    match error {
        SuggestError::Io(_) => {
            // Expected: io::Error should convert to the Io variant
        }
        _ => panic!("Expected Io variant"),
    }
}

#[test]
fn test_result_type()
{
    // Test that Result type is properly aliased
    let _result: SuggestResult<()> = Ok(());
    let _error_result: SuggestResult<()> = Err(SuggestError::InvalidBuildId("zz".to_string()));
}
