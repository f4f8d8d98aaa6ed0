use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::{BTreeMap, HashMap};

/// A TrueType / OpenType font used for label text. The whole font file is
/// embedded in the generated PDF, so prefer compact fonts.
pub struct Font {
    pub face: OwnedFace,
}

/// Horizontal advance and height of a glyph, in font units
#[derive(Copy, Clone, Debug)]
struct GlyphSize {
    advance: u16,
    height: i16,
}

impl Font {
    /// Parse a font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn name_record(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id)
            .find_map(|name| name.to_string())
    }

    /// The full name of the font, if it has one that can be decoded
    pub fn name(&self) -> Option<String> {
        self.name_record(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if it has one that can be decoded
    pub fn family(&self) -> Option<String> {
        self.name_record(owned_ttf_parser::name_id::FAMILY)
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Width of `text` set at `size`. Characters without a glyph are measured
    /// as the glyph they will be drawn with.
    pub fn text_width(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| {
                scaling
                    * self
                        .face()
                        .glyph_hor_advance(GlyphId(self.glyph_id_or_fallback(ch)))
                        .unwrap_or_default() as f32
            })
            .sum()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn for `ch`: its own glyph, else U+FFFD, else '?', else .notdef
    pub fn glyph_id_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Glyph id to the first unicode character that maps to it
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|g| g.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }

        map
    }

    fn glyph_sizes(&self, glyphs: &BTreeMap<u16, char>) -> BTreeMap<u16, GlyphSize> {
        let face = self.face();
        glyphs
            .keys()
            .filter_map(|&gid| {
                let glyph = GlyphId(gid);
                let advance = face.glyph_hor_advance(glyph)?;
                let height = face
                    .glyph_bounding_box(glyph)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                Some((gid, GlyphSize { advance, height }))
            })
            .collect()
    }

    /// Scale from font units to the 1000-unit glyph space PDF expects
    fn glyph_space(&self) -> f32 {
        1000.0 / self.face().units_per_em() as f32
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        sizes: &BTreeMap<u16, GlyphSize>,
        descriptor: Ref,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::CidFont(font_index));
        let scale = self.glyph_space();

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor);

        // the most frequent advance becomes the default width
        let mut advance_counts: HashMap<u16, usize> = HashMap::new();
        for size in sizes.values() {
            *advance_counts.entry(size.advance).or_insert(0) += 1;
        }
        let default_width = advance_counts
            .iter()
            .max_by_key(|&(advance, count)| (*count, *advance))
            .map(|(&advance, _)| advance as f32 * scale)
            .unwrap_or(1000.0);

        // runs of consecutive glyph ids share one widths entry
        let mut widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (&gid, size) in sizes.iter() {
            match run_start {
                Some(start) if start as usize + run.len() == gid as usize => {}
                Some(start) => {
                    widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                }
                None => run_start = Some(gid),
            }
            run.push(size.advance as f32 * scale);
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        sizes: &BTreeMap<u16, GlyphSize>,
        writer: &mut Pdf,
    ) -> Ref {
        let face = self.face();
        let scale = self.glyph_space();

        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let max_width = sizes.values().map(|s| s.advance).max().unwrap_or_default();
        let max_height = sizes.values().map(|s| s.height).max().unwrap_or_default();
        let total_width: usize = sizes.values().map(|s| s.advance as usize).sum();
        let avg_width = total_width as f32 / sizes.len().max(1) as f32;

        let mut flags = FontFlags::empty();
        flags.set(FontFlags::FIXED_PITCH, face.is_monospaced());
        flags.set(FontFlags::ITALIC, face.is_italic());

        let name = descriptor_name(self.name(), font_index);
        let family = descriptor_name(self.family(), font_index);

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: 0.0,
            x2: max_width as f32 * scale,
            y2: max_height as f32 * scale,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scale);
        descriptor.descent(face.descender() as f32 * scale);
        descriptor.leading(face.line_gap() as f32 * scale);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scale)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .or_else(|| face.capital_height())
                .unwrap_or_default() as f32
                * scale,
        );
        // TrueType has no stem width; 80 is the usual stand-in for regular weights
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scale);
        descriptor.max_width(max_width as f32 * scale);
        descriptor.missing_width(max_width as f32 * scale);
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries sharing a high byte
        let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
        for (&gid, &ch) in glyphs.iter() {
            let starts_block = match blocks.last() {
                Some(block) => block.len() >= 100 || (block[0].0 >> 8) != (gid >> 8),
                None => true,
            };
            if starts_block {
                blocks.push(Vec::new());
            }
            if let Some(block) = blocks.last_mut() {
                block.push((gid, ch));
            }
        }

        for block in blocks {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                cmap.push_str(&format!("<{gid:04x}> <{:04x}>\n", u32::from(ch)));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }

    /// Emit the font as a Type0 font with an Identity-H encoding, so content
    /// streams can address glyphs by their 16-bit glyph id
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        id: Id<Font>,
        writer: &mut Pdf,
    ) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));

        let glyphs = self.glyph_chars();
        let sizes = self.glyph_sizes(&glyphs);

        let descriptor = self.write_descriptor(refs, font_index, &sizes, writer);
        let cid_font = self.write_cid(refs, font_index, &sizes, descriptor, writer);
        let to_unicode = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font);
        font.to_unicode(to_unicode);
    }
}

/// Fonts whose name table only holds undecodable records still get embedded,
/// under the same `F{n}` name their resource uses
fn descriptor_name(record: Option<String>, font_index: usize) -> String {
    record.unwrap_or_else(|| format!("F{font_index}"))
}
