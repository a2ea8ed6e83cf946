// Integration test for the image -> frames -> document pipeline

#[cfg(test)]
mod tests {
    use crate::model::frames::Player;
    use crate::pipeline::generator::{self, GeneratorOptions};
    use crate::pipeline::{frame_io, images, renderer};
    use image::{DynamicImage, Rgba, RgbaImage};
    use tempfile::tempdir;

    // A filled ring: has both inked and blank regions, so rotation visibly
    // changes the silhouette between frames.
    fn ring_image(size: u32) -> DynamicImage {
        let mut img = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]));
        let c = size as f32 / 2.0;
        let outer = size as f32 * 0.45;
        let inner = size as f32 * 0.2;
        for y in 0..size {
            for x in 0..size {
                let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2)).sqrt();
                if d <= outer && d >= inner {
                    img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
                }
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_full_pipeline_image_to_playable_document() {
        let temp_dir = tempdir().unwrap();

        // Render the source image to disk and rediscover it like the app does
        let source_dir = temp_dir.path().join("sources");
        std::fs::create_dir_all(&source_dir).unwrap();
        ring_image(60).save(source_dir.join("ring.png")).unwrap();

        let source = images::resolve_source(&source_dir).unwrap();
        let image = image::open(&source).unwrap();

        let options = GeneratorOptions {
            columns: 20,
            depth: 5,
            frame_count: 12,
            ..GeneratorOptions::default()
        };

        let frames = generator::generate(&image, &options, |_, _| {}).unwrap();
        assert_eq!(frames.len(), 12);

        // Persist and reload through the document format the player consumes
        let doc_path = temp_dir.path().join("ascii_frames.json");
        frame_io::save_frames(&frames, &doc_path).unwrap();
        let loaded = frame_io::load_frames(&doc_path).unwrap();
        assert_eq!(loaded, frames);

        // Play one full loop and confirm the wraparound lands on frame 0
        let count = loaded.len();
        let first = loaded.frames()[0].clone();
        let mut player = Player::new(loaded);
        for _ in 0..count {
            player.advance();
        }
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.current(), first);
    }

    #[test]
    fn test_rotation_changes_the_silhouette() {
        let options = GeneratorOptions {
            columns: 20,
            depth: 5,
            frame_count: 8,
            ..GeneratorOptions::default()
        };
        let frames = generator::generate(&ring_image(60), &options, |_, _| {}).unwrap();

        // A quarter turn views the slab edge-on; it cannot match the head-on view.
        assert_ne!(frames.frames()[0], frames.frames()[2]);
    }

    #[test]
    fn test_frames_use_only_known_glyphs() {
        let options = GeneratorOptions {
            columns: 16,
            depth: 3,
            frame_count: 4,
            ..GeneratorOptions::default()
        };
        let frames = generator::generate(&ring_image(48), &options, |_, _| {}).unwrap();
        for frame in frames.frames() {
            for ch in frame.chars() {
                assert!(
                    matches!(
                        ch,
                        renderer::FACE_GLYPH | renderer::SIDE_GLYPH | renderer::BLANK_GLYPH | '\n'
                    ),
                    "unexpected glyph {:?}",
                    ch
                );
            }
        }
    }
}
