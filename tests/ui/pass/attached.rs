use identity::{backed_by, identifiable, Identifiable, Identifier, UuidIdentifier};

mod model {
    use identity::{backed_by, identifiable, Uuid};

    #[backed_by(u64, Ord)]
    pub struct TicketId {}

    #[identifiable(Uuid)]
    #[derive(Debug, Clone)]
    pub struct Photo<T> {
        pub data: T,
    }
}

#[backed_by(String)]
struct Label;

#[identifiable(u32, Ord, Copy)]
struct Unit;

fn main() {
    let ticket = model::TicketId::new(7);
    assert_eq!(ticket.raw_value, 7);
    assert!(model::TicketId::new(1) < ticket);

    let photo = model::Photo {
        id: model::PhotoId::unique(),
        data: vec![0u8; 4],
    };
    assert_eq!(photo.id(), photo.id.clone());

    assert_eq!(Label::new("x".to_string()).raw_value(), "x");

    let unit = Unit { id: UnitId::new(3) };
    assert_eq!(*unit.id().raw_value(), 3);
}
