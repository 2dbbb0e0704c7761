//! Tool implementations
//!
//! Every executor is a pure function of its normalized arguments and, for
//! `get_current_time`, the instant supplied by a [`Clock`].

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::protocol::ToolCallResult;
use super::validate::{CalculateArgs, NormalizedArgs};
use crate::types::{Operation, Timezone};

/// Text returned when `calculate` divides by zero
pub const DIVIDE_BY_ZERO: &str = "오류: 0으로 나눌 수 없습니다";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Run the executor matching `args`
pub fn execute(args: &NormalizedArgs, now: DateTime<Utc>) -> ToolCallResult {
    match args {
        NormalizedArgs::CurrentTime { timezone } => current_time(*timezone, now),
        NormalizedArgs::Echo { message } => echo(message),
        NormalizedArgs::Calculate(calc) => calculate(calc),
    }
}

/// `get_current_time`: wall-clock reading shifted by a fixed offset
pub fn current_time(timezone: Timezone, now: DateTime<Utc>) -> ToolCallResult {
    let local = now + Duration::hours(timezone.offset_hours());
    let tz = timezone.as_str();
    ToolCallResult::text(format!(
        "현재 {} 시간: {} {}",
        tz,
        local.format(TIMESTAMP_FORMAT),
        tz
    ))
}

/// `echo`: returns the message untouched
pub fn echo(message: &str) -> ToolCallResult {
    ToolCallResult::text(format!("Echo: {}", message))
}

/// `calculate`: one arithmetic operation on two floats
pub fn calculate(args: &CalculateArgs) -> ToolCallResult {
    let Ok(operation) = args.operation.parse::<Operation>() else {
        return ToolCallResult::error(format!("오류: 알 수 없는 연산 '{}'", args.operation));
    };

    let (a, b) = (args.a, args.b);
    let result = match operation {
        Operation::Add => a + b,
        Operation::Subtract => a - b,
        Operation::Multiply => a * b,
        Operation::Divide => {
            if b == 0.0 {
                return ToolCallResult::error(DIVIDE_BY_ZERO);
            }
            a / b
        }
    };

    ToolCallResult::text(format!(
        "{} {} {} = {}",
        format_number(a),
        operation.as_str(),
        format_number(b),
        format_number(result)
    ))
}

/// Result for a fault raised while preparing or running a tool
pub fn execution_error(fault: impl fmt::Display) -> ToolCallResult {
    ToolCallResult::error(format!("도구 실행 오류: {}", fault))
}

/// Render a float as a literal: integral values keep `.0`, very large or
/// very small magnitudes use a signed exponent of at least two digits.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Debug switches to exponent form outside [1e-4, 1e16)
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn calc(a: f64, b: f64, operation: &str) -> ToolCallResult {
        calculate(&CalculateArgs {
            a,
            b,
            operation: operation.to_string(),
        })
    }

    #[test]
    fn test_current_time_format() {
        let now = Utc.with_ymd_and_hms(2024, 11, 5, 20, 30, 15).unwrap();

        let utc = current_time(Timezone::Utc, now);
        assert_eq!(utc.first_text(), "현재 UTC 시간: 2024-11-05 20:30:15 UTC");
        assert!(!utc.is_error());

        let kst = current_time(Timezone::Kst, now);
        assert_eq!(kst.first_text(), "현재 KST 시간: 2024-11-06 05:30:15 KST");
    }

    #[test]
    fn test_echo_verbatim() {
        assert_eq!(echo("<b>\"hi\"</b>").first_text(), "Echo: <b>\"hi\"</b>");
        assert_eq!(echo("").first_text(), "Echo: ");
    }

    #[test]
    fn test_calculate_success_text() {
        assert_eq!(calc(15.0, 7.0, "multiply").first_text(), "15.0 multiply 7.0 = 105.0");
        assert_eq!(calc(1.0, 4.0, "divide").first_text(), "1.0 divide 4.0 = 0.25");
        assert_eq!(calc(0.1, 0.2, "add").first_text(), "0.1 add 0.2 = 0.30000000000000004");
        assert_eq!(calc(5.0, 8.0, "subtract").first_text(), "5.0 subtract 8.0 = -3.0");
    }

    #[test]
    fn test_divide_by_zero() {
        for b in [0.0, -0.0] {
            let result = calc(3.0, b, "divide");
            assert!(result.is_error());
            assert_eq!(result.first_text(), DIVIDE_BY_ZERO);
        }
    }

    #[test]
    fn test_unknown_operation() {
        let result = calc(3.0, 1.0, "power");
        assert!(result.is_error());
        assert_eq!(result.first_text(), "오류: 알 수 없는 연산 'power'");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(15.0), "15.0");
        assert_eq!(format_number(-0.0), "-0.0");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(1e-5), "1e-05");
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(123456789.0), "123456789.0");
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_number(f64::NAN), "nan");
    }

    #[test]
    fn test_execution_error() {
        let result = execution_error("boom");
        assert!(result.is_error());
        assert_eq!(result.first_text(), "도구 실행 오류: boom");
    }

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
