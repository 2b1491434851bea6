//! Console output capture for dispatched batches.
//!
//! While an [`OutputCaptureGuard`] is alive, output written through this
//! crate's [`print!`](crate::print), [`println!`](crate::println),
//! [`eprint!`](crate::eprint) and [`eprintln!`](crate::eprintln) macros on the
//! arming thread goes to the batch reporter instead of the process stdio.
//! Dropping the guard restores whatever was armed before.

use std::{
    cell::RefCell,
    io::{self, Write},
    sync::Arc,
};

use crate::report::{ConsoleOutputReceiver, OutputStream};

thread_local! {
    static OUTPUT_CAPTURE: RefCell<Option<Arc<dyn ConsoleOutputReceiver>>> = const { RefCell::new(None) };
}

pub struct OutputCaptureGuard(Option<Arc<dyn ConsoleOutputReceiver>>);

impl OutputCaptureGuard {
    pub fn arm(receiver: Arc<dyn ConsoleOutputReceiver>) -> Self {
        let previous = OUTPUT_CAPTURE.with_borrow_mut(|capture| capture.replace(receiver));
        Self(previous)
    }
}

impl Drop for OutputCaptureGuard {
    fn drop(&mut self) {
        let previous = self.0.take();
        OUTPUT_CAPTURE.with_borrow_mut(|capture| *capture = previous);
    }
}

pub fn is_armed() -> bool {
    OUTPUT_CAPTURE.with_borrow(|capture| capture.is_some())
}

/// Send `output` to the armed receiver, or the real stream when nothing is armed.
pub fn write_output(output: &[u8], stream: OutputStream) {
    let receiver = OUTPUT_CAPTURE.with_borrow(|capture| capture.clone());
    match receiver {
        Some(receiver) => receiver.write_test_output(output, stream),
        // nothing armed, stdio write errors are dropped
        None => {
            let _ = match stream {
                OutputStream::Stdout => io::stdout().write_all(output),
                OutputStream::Stderr => io::stderr().write_all(output),
            };
        }
    }
}

#[doc(hidden)]
pub fn write_fmt(args: std::fmt::Arguments<'_>, newline: bool, stream: OutputStream) {
    let mut buf = args.to_string().into_bytes();
    if newline {
        buf.push(b'\n');
    }
    write_output(&buf, stream);
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::capture::write_fmt(
            ::std::format_args!($($arg)*),
            false,
            $crate::report::OutputStream::Stdout,
        )
    };
}

#[macro_export]
macro_rules! println {
    () => {
        $crate::println!("")
    };
    ($($arg:tt)*) => {
        $crate::capture::write_fmt(
            ::std::format_args!($($arg)*),
            true,
            $crate::report::OutputStream::Stdout,
        )
    };
}

#[macro_export]
macro_rules! eprint {
    ($($arg:tt)*) => {
        $crate::capture::write_fmt(
            ::std::format_args!($($arg)*),
            false,
            $crate::report::OutputStream::Stderr,
        )
    };
}

#[macro_export]
macro_rules! eprintln {
    () => {
        $crate::eprintln!("")
    };
    ($($arg:tt)*) => {
        $crate::capture::write_fmt(
            ::std::format_args!($($arg)*),
            true,
            $crate::report::OutputStream::Stderr,
        )
    };
}
