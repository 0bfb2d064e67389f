#![allow(dead_code)]

use codable::record;

record! {
    pub struct Manual {
        pub id: u64,
    }

    pub enum ManualKey {
        Id,
    }
}

fn main() {}
