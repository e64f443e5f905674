mod corpus;
mod cross_encoder;
mod vector_index;

pub use corpus::CorpusProvider;
pub use cross_encoder::CrossEncoderModel;
pub use vector_index::VectorIndex;
