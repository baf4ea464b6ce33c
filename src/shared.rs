//! Shared, identity-carrying graph nodes.
//!
//! Owned Rust values always form trees, so cycles can only appear through
//! shared ownership with interior mutability. [`Shared`] (single-threaded,
//! `Rc<RefCell<T>>`) and [`SyncShared`] (`Arc<RwLock<T>>`) are the node types
//! the encoder tracks by identity: reaching a node again while it is still
//! being encoded fails with [`Error::Cycle`](crate::Error::Cycle), while
//! reaching it again from a sibling encodes it a second time.
//!
//! A node that cannot be read at encode time (mutably borrowed, write-locked
//! or poisoned) is reported as [`Unreadable`], which makes the encoder drop
//! the member that holds it.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_graphjson::{to_string, Shared};
//!
//! #[derive(Serialize)]
//! struct Pair {
//!     left: Shared<Vec<i32>>,
//!     right: Shared<Vec<i32>>,
//! }
//!
//! let items = Shared::new(vec![1, 2]);
//! let pair = Pair { left: items.clone(), right: items };
//! assert_eq!(to_string(&pair).unwrap(), r#"{"left":[1,2],"right":[1,2]}"#);
//! ```

use serde::{Serialize, Serializer};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};

/// Newtype-struct name that tells the encoder the wrapped reference is a
/// shared node whose address identifies it.
pub(crate) const SHARED_TOKEN: &str = "$serde_graphjson::private::Shared";

/// Unit-struct name that tells the encoder a member could not be read.
pub(crate) const UNREADABLE_TOKEN: &str = "$serde_graphjson::private::Unreadable";

/// Marker for a member whose value could not be read.
///
/// Hand-written `Serialize` impls can emit this to have the surrounding
/// member omitted, the same way an unreadable [`Shared`] is treated. Other
/// serializers see a plain unit struct.
///
/// ```rust
/// use serde::ser::{Serialize, SerializeStruct, Serializer};
/// use serde_graphjson::{to_string, Unreadable};
///
/// struct Account {
///     id: u32,
/// }
///
/// impl Serialize for Account {
///     fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
///         let mut s = serializer.serialize_struct("Account", 2)?;
///         s.serialize_field("id", &self.id)?;
///         s.serialize_field("secret", &Unreadable)?;
///         s.end()
///     }
/// }
///
/// assert_eq!(to_string(&Account { id: 7 }).unwrap(), r#"{"id":7}"#);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unreadable;

impl Serialize for Unreadable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_unit_struct(UNREADABLE_TOKEN)
    }
}

/// A single-threaded shared node (`Rc<RefCell<T>>`) tracked by identity.
///
/// Equality is identity: two handles are equal when they point at the same
/// node.
pub struct Shared<T: ?Sized>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }
}

impl<T: ?Sized> Shared<T> {
    /// Immutably borrows the node. Panics if it is mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrows the node. Panics if it is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Returns `true` if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        Shared::ptr_eq(self, other)
    }
}

// The node may be cyclic, so only its address is printed.
impl<T: ?Sized> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared")
            .field(&format_args!("{:p}", Rc::as_ptr(&self.0)))
            .finish()
    }
}

impl<T> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Shared::new(value)
    }
}

impl<T: ?Sized + Serialize> Serialize for Shared<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.try_borrow() {
            Ok(node) => serializer.serialize_newtype_struct(SHARED_TOKEN, &*node),
            Err(_) => Unreadable.serialize(serializer),
        }
    }
}

/// A thread-safe shared node (`Arc<RwLock<T>>`) tracked by identity.
///
/// Encoding takes a read lock; a node that is write-locked or poisoned at
/// that moment counts as unreadable.
pub struct SyncShared<T: ?Sized>(Arc<RwLock<T>>);

impl<T> SyncShared<T> {
    pub fn new(value: T) -> Self {
        SyncShared(Arc::new(RwLock::new(value)))
    }
}

impl<T: ?Sized> SyncShared<T> {
    /// Locks the node for reading, recovering from poisoning.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Locks the node for writing, recovering from poisoning.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: ?Sized> Clone for SyncShared<T> {
    fn clone(&self) -> Self {
        SyncShared(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for SyncShared<T> {
    fn eq(&self, other: &Self) -> bool {
        SyncShared::ptr_eq(self, other)
    }
}

impl<T: ?Sized> fmt::Debug for SyncShared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SyncShared")
            .field(&format_args!("{:p}", Arc::as_ptr(&self.0)))
            .finish()
    }
}

impl<T> From<T> for SyncShared<T> {
    fn from(value: T) -> Self {
        SyncShared::new(value)
    }
}

impl<T: ?Sized + Serialize> Serialize for SyncShared<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.try_read() {
            Ok(node) => serializer.serialize_newtype_struct(SHARED_TOKEN, &*node),
            Err(TryLockError::WouldBlock) | Err(TryLockError::Poisoned(_)) => {
                Unreadable.serialize(serializer)
            }
        }
    }
}
