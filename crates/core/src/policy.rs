//! Declarative transition-authorization policy.
//!
//! Every orchestrator operation consults the single [`POLICY`] table here
//! instead of re-implementing role checks inline, so the full authorization
//! surface is auditable (and testable) in one place.

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_CUSTOMER, ROLE_OWNER, ROLE_STAFF};
use crate::types::DbId;

/// An authenticated actor as extracted from the access token.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
}

/// The orchestrator operations subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Confirm,
    Cancel,
    CheckInSelf,
    CheckInScan,
    Complete,
    ViewCredential,
    ListShop,
}

/// Classes an actor can match for a given reservation/shop context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorClass {
    /// Platform administrator (any shop, any reservation).
    Admin,
    /// Owner of the shop the reservation belongs to.
    ShopOwner,
    /// Staff member of that shop.
    ShopStaff,
    /// The customer who placed the reservation.
    ReservationCustomer,
    /// Any authenticated customer (creation has no target reservation yet).
    AnyCustomer,
}

/// Resource ownership context resolved by the caller before authorization.
///
/// `is_shop_staff` is looked up from the staff membership table; the other
/// two come straight off the loaded rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceContext {
    pub reservation_customer_id: Option<DbId>,
    pub shop_owner_id: Option<DbId>,
    pub is_shop_staff: bool,
}

/// One row of the policy table: the actor classes allowed to perform an
/// operation. Matching any listed class grants the operation.
struct Rule {
    operation: Operation,
    allowed: &'static [ActorClass],
}

/// The authorization table, mirroring the lifecycle's actor column:
///
/// | operation      | allowed actors                              |
/// |----------------|---------------------------------------------|
/// | create         | customer                                    |
/// | confirm        | shop owner, admin                           |
/// | cancel         | customer (own), shop owner (own shop), admin|
/// | check-in (self)| customer (own)                              |
/// | check-in (scan)| shop owner, shop staff, admin               |
/// | complete       | shop owner, admin                           |
/// | view credential| customer (own), shop owner, admin           |
/// | list (shop)    | shop owner, shop staff, admin               |
const POLICY: &[Rule] = &[
    Rule {
        operation: Operation::Create,
        allowed: &[ActorClass::AnyCustomer],
    },
    Rule {
        operation: Operation::Confirm,
        allowed: &[ActorClass::Admin, ActorClass::ShopOwner],
    },
    Rule {
        operation: Operation::Cancel,
        allowed: &[
            ActorClass::Admin,
            ActorClass::ShopOwner,
            ActorClass::ReservationCustomer,
        ],
    },
    Rule {
        operation: Operation::CheckInSelf,
        allowed: &[ActorClass::ReservationCustomer],
    },
    Rule {
        operation: Operation::CheckInScan,
        allowed: &[
            ActorClass::Admin,
            ActorClass::ShopOwner,
            ActorClass::ShopStaff,
        ],
    },
    Rule {
        operation: Operation::Complete,
        allowed: &[ActorClass::Admin, ActorClass::ShopOwner],
    },
    Rule {
        operation: Operation::ViewCredential,
        allowed: &[
            ActorClass::Admin,
            ActorClass::ShopOwner,
            ActorClass::ReservationCustomer,
        ],
    },
    Rule {
        operation: Operation::ListShop,
        allowed: &[
            ActorClass::Admin,
            ActorClass::ShopOwner,
            ActorClass::ShopStaff,
        ],
    },
];

/// Determine every class the actor matches in the given context.
fn classify(actor: &Actor, ctx: &ResourceContext) -> Vec<ActorClass> {
    let mut classes = Vec::with_capacity(3);

    if actor.role == ROLE_ADMIN {
        classes.push(ActorClass::Admin);
    }
    if actor.role == ROLE_OWNER && ctx.shop_owner_id == Some(actor.user_id) {
        classes.push(ActorClass::ShopOwner);
    }
    if actor.role == ROLE_STAFF && ctx.is_shop_staff {
        classes.push(ActorClass::ShopStaff);
    }
    if actor.role == ROLE_CUSTOMER {
        classes.push(ActorClass::AnyCustomer);
        if ctx.reservation_customer_id == Some(actor.user_id) {
            classes.push(ActorClass::ReservationCustomer);
        }
    }

    classes
}

/// Authorize `operation` for `actor` against the resolved resource context.
///
/// Returns `Forbidden` when no class the actor matches appears in the
/// operation's allow list.
pub fn authorize(
    operation: Operation,
    actor: &Actor,
    ctx: &ResourceContext,
) -> Result<(), CoreError> {
    let rule = POLICY
        .iter()
        .find(|r| r.operation == operation)
        .ok_or_else(|| CoreError::Internal(format!("No policy rule for {operation:?}")))?;

    let classes = classify(actor, ctx);
    if classes.iter().any(|c| rule.allowed.contains(c)) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role '{}' may not perform {operation:?} on this resource",
            actor.role
        )))
    }
}
