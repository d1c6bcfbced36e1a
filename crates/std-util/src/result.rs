/// Unwraps an `Err`, panicking with the `Ok` value otherwise.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(e) => e,
            Ok(v) => {
                #[allow(unused_mut)]
                let mut msg = format!("expected `Err`; actual=Ok({:?})", v);
                $( msg.push_str(&format!(", {}", format_args!($($t)*))); )?
                panic!("{}", msg);
            }
        }
    };
}

/// Unwraps an `Ok`, panicking with the error's display form otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Ok(v) => v,
            Err(e) => {
                #[allow(unused_mut)]
                let mut msg = format!("expected `Ok`; actual=Err({})", e);
                $( msg.push_str(&format!(", {}", format_args!($($t)*))); )?
                panic!("{}", msg);
            }
        }
    };
}
