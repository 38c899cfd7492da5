use identity::identifier;

identifier!(type: X, potato: Y, octopus: Z, pie: W);

fn main() {}
