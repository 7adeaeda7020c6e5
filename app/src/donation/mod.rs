//! Recording and aggregation of donations. Donations are append-only: every
//! recorded donation lands at the end of the caller's list in the donations
//! document and is never updated or removed.

use crate::{auth, store::Store, user};
use chrono::Utc;

mod entities;

pub use entities::{Aggregate, Amount, AmountNotPositive, Donation, UserTotal, TIMESTAMP_FORMAT};

/// Appends a donation to the caller's list and rewrites the document.
pub fn record(grant: &auth::UserGrant, store: &Store, amount: Amount) -> Donation {
    let mut doc = documents::load(store);
    let donation = Donation {
        amount,
        timestamp: Utc::now(),
    };
    doc.append(&grant.username.0, donation.clone());
    documents::save(store, &doc);
    donation
}

/// All donations made by the caller, oldest first.
pub fn list(grant: &auth::UserGrant, store: &Store) -> Vec<Donation> {
    documents::load(store).donations(&grant.username.0).to_vec()
}

pub fn total(donations: &[Donation]) -> f64 {
    donations.iter().map(|donation| donation.amount.get()).sum()
}

/// Sums every known user's donations. Users without donations appear with a
/// zero total; donations keyed by identities that are no longer in the users
/// document are ignored.
pub fn aggregate(_grant: &auth::AdminGrant, store: &Store) -> Aggregate {
    let doc = documents::load(store);
    let mut users = Vec::new();
    let mut grand_total = 0.0;
    for user in user::all(store) {
        let donations = doc.donations(&user.username.0);
        let sum = total(donations);
        grand_total += sum;
        users.push(UserTotal {
            username: user.username,
            role: user.role,
            total: sum,
            count: donations.len(),
        });
    }
    Aggregate {
        users,
        total: grand_total,
    }
}

mod documents {
    use super::Donation;
    use crate::store::{self, Store};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    /// On-disk layout of the donations document: one append-only list per
    /// username.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub(super) struct DonationsDoc(BTreeMap<String, Vec<Donation>>);

    impl DonationsDoc {
        pub(super) fn append(&mut self, username: &str, donation: Donation) {
            self.0.entry(username.to_owned()).or_default().push(donation);
        }

        pub(super) fn donations(&self, username: &str) -> &[Donation] {
            self.0.get(username).map(Vec::as_slice).unwrap_or(&[])
        }
    }

    pub(super) fn load(store: &Store) -> DonationsDoc {
        store::read(store.donations_path())
    }

    pub(super) fn save(store: &Store, doc: &DonationsDoc) {
        store::write(store.donations_path(), doc);
    }
}
