use serde::{Deserialize, Serialize};
use std::fmt;

/// Motivo de una entrega fallida. Solo acompaña transiciones cuyo
/// destino es `DeliveryFailed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryFailureReason {
    /// Nadie respondió en la dirección de entrega.
    #[default]
    NoAnswer,
    /// La dirección registrada no existe o es incorrecta.
    WrongAddress,
    /// El repartidor consideró inseguro el punto de entrega.
    UnsafeLocation,
    /// El cliente pidió reprogramar la entrega.
    CustomerRequestedReschedule,
}

impl fmt::Display for DeliveryFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryFailureReason::NoAnswer => write!(f, "No answer at the door"),
            DeliveryFailureReason::WrongAddress => write!(f, "Wrong address"),
            DeliveryFailureReason::UnsafeLocation => write!(f, "Unsafe location"),
            DeliveryFailureReason::CustomerRequestedReschedule => {
                write!(f, "Customer requested reschedule")
            }
        }
    }
}
