mod gadget;
mod neighborhood;

pub use gadget::parse_gadget;
pub use gadget::read_gadgets;
pub use gadget::GadgetCounts;
pub use gadget::GadgetKind;
pub use gadget::GadgetRecord;
pub use gadget::ReadGadgetError;
pub use neighborhood::write_end_of_stream;
pub use neighborhood::write_neighborhood;
pub use neighborhood::write_readable;
pub use neighborhood::NeighborhoodReader;
pub use neighborhood::ReadNeighborhoodError;
