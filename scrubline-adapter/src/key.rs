#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

use crate::{PropertyKind, Slot};

#[cfg(feature = "std")]
pub(crate) type AppliedSet = HashSet<(Slot, PropertyKind)>;
#[cfg(not(feature = "std"))]
pub(crate) type AppliedSet = BTreeSet<(Slot, PropertyKind)>;
