use identity::{identifier, Identifier, Uuid, UuidIdentifier};

pub trait Auditable {
    fn audited(&self) -> bool {
        true
    }
}

identifier!(pub AccountId, backing: Uuid, adopts: Ord, Auditable);
identifier!(pub(crate) Email, backing: String);
identifier!(Priority, backing: i8, adopts: PartialOrd, Copy, Hash, Eq);
identifier!("Threshold", backing: f64, adopts: Ord);

fn main() {
    let account = AccountId::unique();
    assert!(account.audited());
    assert_eq!(AccountId::from_raw_value(*account.raw_value()), Some(account));

    let email = Email::new("a@example.com".to_string());
    assert_eq!(String::from(email), "a@example.com");

    let low = Priority::new(-1);
    let high = low;
    assert!(low <= high);

    assert!(Threshold::new(0.1) < Threshold::new(0.2));
}
