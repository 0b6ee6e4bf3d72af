pub mod booking;

pub use booking::{
    parse_stay_range, Booking, BookingPatch, BookingStatus, NewBooking, PaymentMethod,
    PaymentStatus,
};
