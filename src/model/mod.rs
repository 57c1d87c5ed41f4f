pub mod parcel;
pub mod quote;
