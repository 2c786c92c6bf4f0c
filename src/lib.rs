pub mod cs;

pub use cs::ecc::{
    bch::{BchCode, CodeParams, Decoded, Encoding},
    channel::{ChannelModel, Transmission},
    gf2::{Gf2Poly, PadSide},
    BlockCode, Result,
};
pub use cs::error::Error;
