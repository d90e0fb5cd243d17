#[macro_export]
macro_rules! env_str {
    ($key:expr) => {
        std::env::var($key).unwrap_or_default().trim().to_string()
    };
}

#[macro_export]
macro_rules! print_warn {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*).yellow())
    };
}

#[macro_export]
macro_rules! print_err {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*).red())
    };
}

#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        anyhow::anyhow!($crate::error::ConvertError::Other {
            message: format!($($arg)*),
        })
    };
}
