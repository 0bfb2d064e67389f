use codable::record;

record! {
    enum Shape {
        Circle,
        Square,
    }
}

fn main() {}
