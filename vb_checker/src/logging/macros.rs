//! Logging macros
//!
//! Every macro builds a `LogEvent`, attaches `"key" => value` context pairs
//! (any `Display` value) and hands it to `logging::emit`.

/// Attach context pairs to an event expression
#[doc(hidden)]
#[macro_export]
macro_rules! __with_context {
    ($event:expr) => {
        $event
    };

    ($event:expr, $($key:expr => $value:expr),+) => {
        {
            let mut event = $event;
            $(
                event = event.with_context($key, &format!("{}", $value));
            )+
            event
        }
    };
}

// ============================================================================
// ERROR LOGGING MACROS
// ============================================================================

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::emit($crate::logging::LogEvent::error($code, $message))
    };

    ($code:expr, $message:expr, at = $pos:expr) => {
        $crate::logging::emit($crate::logging::LogEvent::error($code, $message).with_position($pos))
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        $crate::logging::emit($crate::__with_context!(
            $crate::logging::LogEvent::error($code, $message),
            $($key => $value),+
        ))
    };

    ($code:expr, $message:expr, at = $pos:expr, $($key:expr => $value:expr),+) => {
        $crate::logging::emit($crate::__with_context!(
            $crate::logging::LogEvent::error($code, $message).with_position($pos),
            $($key => $value),+
        ))
    };
}

// ============================================================================
// SUCCESS / INFO / WARNING
// ============================================================================

/// Milestone reached, tagged with a registered success code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::emit($crate::__with_context!(
            $crate::logging::LogEvent::success($code, $message)
            $(, $key => $value)*
        ))
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::emit($crate::__with_context!(
            $crate::logging::LogEvent::info($message)
            $(, $key => $value)*
        ))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::emit($crate::__with_context!(
            $crate::logging::LogEvent::warning($message)
            $(, $key => $value)*
        ))
    };
}

// ============================================================================
// DEBUG
// ============================================================================

/// Context values are only formatted when debug output is on
#[macro_export]
macro_rules! log_debug {
    ($message:expr, at = $pos:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::emit($crate::__with_context!(
                $crate::logging::LogEvent::debug($message).with_position($pos)
                $(, $key => $value)*
            ))
        }
    };

    ($message:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::emit($crate::__with_context!(
                $crate::logging::LogEvent::debug($message)
                $(, $key => $value)*
            ))
        }
    };
}

/// Success event with a `duration_ms` field from a `Duration`
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr $(, $key:expr => $value:expr)*) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $duration.as_secs_f64() * 1000.0)
            $(, $key => $value)*
        )
    };
}
