use identity::{declare_identifier, Identifier};

declare_identifier!(pub <String, Ord>("Slug"));
declare_identifier!(<u16, Copy, Default>("Port"));

fn main() {
    let slug = Slug::new("hello-world".to_string());
    assert_eq!(slug.description(), "hello-world");
    assert_eq!(Port::default().into_raw_value(), 0);
}
