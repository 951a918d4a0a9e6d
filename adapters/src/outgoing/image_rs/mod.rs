pub mod pixel_codec_image;
