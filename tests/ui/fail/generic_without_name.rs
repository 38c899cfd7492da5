use identity::declare_identifier;

declare_identifier!(<Uuid>());

fn main() {}
