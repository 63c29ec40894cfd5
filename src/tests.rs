//! Scenarios that cross module boundaries

#[cfg(test)]
mod text_tests {
    use std::sync::Arc;

    use kurbo::Shape;

    use crate::core::runner::outline_text;
    use crate::face::{Decoration, Face, FontBuilder, FontStyle, FontVariant, FontWeight};
    use crate::font_source::test_font::TestFont;
    use crate::shaping::CmapShaper;
    use crate::typography::{QuoteState, TypographicOptions};

    fn face_with(options: TypographicOptions, style: FontStyle, variant: FontVariant) -> Face {
        let font = FontBuilder::new("Test", TestFont::latin().with_kerning('A', 'V', -80))
            .options(options)
            .build();
        Face::new(Arc::new(font), 10.0, style, variant)
    }

    fn regular() -> Face {
        face_with(
            TypographicOptions::default(),
            FontStyle::REGULAR,
            FontVariant::Normal,
        )
    }

    #[test]
    fn test_shaped_and_direct_layout_agree() {
        let face = regular();
        let shaper = CmapShaper::new(face.font().source());

        let (direct, direct_advance) = outline_text(&face, "AV", None).unwrap();
        let (shaped, shaped_advance) = outline_text(&face, "AV", Some(&shaper)).unwrap();

        assert!((direct_advance - 11.2).abs() < 1e-9);
        assert!((shaped_advance - direct_advance).abs() < 1e-9);
        assert!((face.text_width("AV") - direct_advance).abs() < 1e-9);
        let (a, b) = (direct.bounding_box(), shaped.bounding_box());
        for (x, y) in [(a.x0, b.x0), (a.y0, b.y0), (a.x1, b.x1), (a.y1, b.y1)] {
            assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_ligatures_reach_the_outline() {
        let options = TypographicOptions {
            common_ligatures: true,
            ..TypographicOptions::default()
        };
        let face = face_with(options, FontStyle::REGULAR, FontVariant::Normal);

        let prepared = face.prepare_text("fi", &mut QuoteState::new());
        assert_eq!(prepared, "\u{FB01}");

        // One ligature glyph instead of 'f' + 'i'
        let (_, advance) = outline_text(&face, "fi", None).unwrap();
        assert!((advance - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_decorations_span_the_advance() {
        let face = regular().with_decoration(Decoration::Underline);
        let (_, advance) = outline_text(&face, "AV", None).unwrap();
        let bounds = face.decorate(advance).bounding_box();

        assert!(bounds.x0.abs() < 1e-9);
        assert!((bounds.x1 - advance).abs() < 1e-9);
        assert!(bounds.y1 < 0.0);
    }

    #[test]
    fn test_faux_styles_change_the_outline_but_not_the_advance() {
        let plain = regular();
        let styled = face_with(
            TypographicOptions::default(),
            FontStyle::new(FontWeight::Bold, true),
            FontVariant::Normal,
        );

        let (plain_path, plain_advance) = plain.to_path("A").unwrap();
        let (styled_path, styled_advance) = styled.to_path("A").unwrap();

        assert!((plain_advance - styled_advance).abs() < 1e-9);
        let (plain_box, styled_box) = (plain_path.bounding_box(), styled_path.bounding_box());
        assert!(styled_box.width() > plain_box.width());
        assert!(styled_box.height() > plain_box.height());
    }

    #[test]
    fn test_superscripts_sit_above_the_baseline() {
        let face = face_with(
            TypographicOptions::default(),
            FontStyle::REGULAR,
            FontVariant::Superscript,
        );
        let (path, _) = outline_text(&face, "A", None).unwrap();
        let bounds = path.bounding_box();

        // Shifted by a third of the size, less the faux bold
        assert!(bounds.y0 > 3.0 && bounds.y0 < 3.3);
        assert!(bounds.height() < 7.0);
    }
}
