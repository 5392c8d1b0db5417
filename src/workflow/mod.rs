pub mod form_state;
pub mod selection;
pub mod upload;
pub mod upload_slot;

pub use form_state::{FormState, ServiceStatus, ViewFocus};
pub use upload_slot::{SlotPosition, SlotStatus, UploadCompletion, UploadSlot, UploadTicket};
