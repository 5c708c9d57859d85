pub mod greek_letter;
pub mod sample;
pub mod symbol_image;

pub use greek_letter::GreekLetter;
pub use sample::{load_samples_json, Sample};
pub use symbol_image::{GreekSymbolImage, INPUT_VECTOR_SIZE};
