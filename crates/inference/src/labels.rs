/// Diabetic retinopathy grades in the order of the model's output vector.
pub const CLASS_NAMES: [&str; 5] = ["Mild", "Moderate", "No_DR", "Proliferative_DR", "Severe"];
