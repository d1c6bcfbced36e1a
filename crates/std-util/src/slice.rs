#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {{
        let e = &$e;
        if !e.is_empty() {
            panic!("expected empty; actual={:?}", e);
        }
    }};
}
