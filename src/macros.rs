// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// log at error level and terminate with exit code 1
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        ::log::error!($($arg)*);
        ::std::process::exit(1)
    }};
}
