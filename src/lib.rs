//! Query network interfaces, their addresses and default gateways on *nix.
//!
//! The crate normalizes the platform's view of interface configuration
//! (`getifaddrs` lists, link-layer `sockaddr` variants, routing-socket
//! dumps) into a small set of flat record types. There are three entry
//! points:
//!
//! * [`ifaddrs::Getifaddrs::visit`] streams every configured address
//!   through per-family callbacks in a single walk.
//! * [`ifaddrs::Getifaddrs::snapshot`] aggregates the same data into a
//!   deduplicated interface table plus a flat address table.
//! * [`route::visit_gateways`] scans the kernel routing table for
//!   default-route gateways, on platforms with a routing-dump sysctl.
//!
//! # Example
//!
//! ```no_run
//! use ifscan::ifaddrs::Getifaddrs;
//!
//! let source = Getifaddrs::resolve().unwrap();
//! let snapshot = source.snapshot().unwrap();
//! for iface in &snapshot.interfaces {
//!     println!("{} ({:?})", iface.name, iface.hardware_type);
//! }
//! ```

#[macro_use]
mod macros;

pub mod errno;
pub mod hwtype;
pub mod ifaddrs;
pub mod interfaces;
pub mod net;
pub mod route;
mod sys;

pub use crate::errno::Errno;

use std::result;

/// Common return type of the crate's fallible operations.
///
/// Failures carry the platform error number; callers inspect it to tell
/// "unsupported here" ([`Errno::ENOTSUP`]) apart from transient platform
/// failures.
pub type Result<T> = result::Result<T, Errno>;
