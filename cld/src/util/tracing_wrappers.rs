// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
pub(crate) use no_tracing::{debug, trace};

// Same call syntax as the `tracing` macros; arguments are not evaluated.
#[cfg(not(feature = "tracing"))]
mod no_tracing {
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
    pub(crate) use debug;
    pub(crate) use trace;
}
