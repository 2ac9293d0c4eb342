//! Order access policy.
//!
//! Pure functions of the caller's identity and the target order - no I/O,
//! no side effects. Every decision is an exhaustive `match` over
//! [`Role`], so adding a role refuses to compile until each site says what
//! that role may see.

use verdant_core::{Role, UserId};

use crate::auth::CurrentUser;

/// Which orders a list operation may return. Callers turn this into a
/// query predicate; nothing is fetched and discarded client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderVisibility {
    /// Every order, unfiltered.
    All,
    /// Only orders whose owning buyer matches.
    OwnedBy(UserId),
}

/// Access decisions for the order endpoints.
///
/// `enforce_ownership` gates the single-order read/update check. The
/// legacy system let any authenticated caller fetch or update any order
/// by id; whether that was intentional is a deployment decision, so it is
/// configuration here rather than a hardcoded answer.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    enforce_ownership: bool,
}

impl AccessPolicy {
    /// Create a policy.
    #[must_use]
    pub const fn new(enforce_ownership: bool) -> Self {
        Self { enforce_ownership }
    }

    /// The visibility scope for a list operation.
    #[must_use]
    pub const fn list_visibility(&self, caller: &CurrentUser) -> OrderVisibility {
        match caller.role {
            Role::Admin => OrderVisibility::All,
            // Sellers should see orders containing their products. There is
            // no seller-product ownership relation yet, so this falls back
            // to the full set rather than inventing one.
            Role::Seller => OrderVisibility::All,
            Role::User => OrderVisibility::OwnedBy(caller.id),
        }
    }

    /// May the caller read a single order owned by `owner`?
    #[must_use]
    pub fn can_view_order(&self, caller: &CurrentUser, owner: UserId) -> bool {
        if !self.enforce_ownership {
            return true;
        }

        match caller.role {
            Role::Admin => true,
            // Sellers get no extra read grant until the ownership relation
            // exists; they are scoped like buyers here.
            Role::Seller | Role::User => caller.id == owner,
        }
    }

    /// May the caller update an order owned by `owner`?
    #[must_use]
    pub fn can_update_order(&self, caller: &CurrentUser, owner: UserId) -> bool {
        self.can_view_order(caller, owner)
    }
}

/// May this role create, edit or delete catalog products?
#[must_use]
pub const fn can_manage_products(role: Role) -> bool {
    match role {
        Role::Seller | Role::Admin => true,
        Role::User => false,
    }
}
