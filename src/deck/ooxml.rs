//! Writes a PresentationML (.pptx) package: one master, one blank layout, one theme,
//! and a slide per record with a title box, a body box and an optional picture.

use std::io::{Cursor, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::schema::SlideRecord;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXT_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

// 4:3 slide, all geometry in EMU (914400 per inch).
pub const SLIDE_WIDTH: i64 = 9_144_000;
pub const SLIDE_HEIGHT: i64 = 6_858_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

pub const TITLE_RECT: Rect = Rect {
    x: 457_200,
    y: 274_638,
    cx: 8_229_600,
    cy: 1_143_000,
};

pub const BODY_RECT: Rect = Rect {
    x: 457_200,
    y: 1_600_200,
    cx: 8_229_600,
    cy: 4_525_963,
};

/// Body box narrowed to leave room for the picture on the right.
pub const BODY_WITH_IMAGE_RECT: Rect = Rect {
    x: 457_200,
    y: 1_600_200,
    cx: 4_419_600,
    cy: 4_525_963,
};

pub const IMAGE_RECT: Rect = Rect {
    x: 5_029_200,
    y: 1_600_200,
    cx: 3_657_600,
    cy: 3_657_600,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    /// Identifies the format from the leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else {
            None
        }
    }

    /// Guesses from the file extension in a URL's path, ignoring any query string.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let mime = mime_guess::from_path(path).first()?;
        match mime.essence_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl EmbeddedImage {
    pub fn new(bytes: Vec<u8>, source_url: &str) -> Self {
        let format = ImageFormat::sniff(&bytes)
            .or_else(|| ImageFormat::from_url(source_url))
            .unwrap_or(ImageFormat::Png);
        Self { bytes, format }
    }
}

/// One slide ready to be written: its record and the picture to embed, if any.
pub struct SlidePart<'a> {
    pub record: &'a SlideRecord,
    pub image: Option<&'a EmbeddedImage>,
}

pub struct PackageWriter {
    title: String,
    created: DateTime<Utc>,
}

impl PackageWriter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created: Utc::now(),
        }
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub fn write(&self, slides: &[SlidePart<'_>]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut put = |name: &str, data: &[u8]| -> Result<()> {
            zip.start_file(name, options)?;
            zip.write_all(data)?;
            Ok(())
        };

        put("[Content_Types].xml", self.content_types(slides).as_bytes())?;
        put("_rels/.rels", root_rels().as_bytes())?;
        put("docProps/core.xml", self.core_props().as_bytes())?;
        put("docProps/app.xml", app_props(slides.len()).as_bytes())?;
        put("ppt/presentation.xml", presentation(slides.len()).as_bytes())?;
        put(
            "ppt/_rels/presentation.xml.rels",
            presentation_rels(slides.len()).as_bytes(),
        )?;
        put("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes())?;
        put(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            relationships(&[
                ("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                ("rId2", REL_THEME, "../theme/theme1.xml"),
            ])
            .as_bytes(),
        )?;
        put("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT.as_bytes())?;
        put(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            relationships(&[("rId1", REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")])
                .as_bytes(),
        )?;
        put("ppt/theme/theme1.xml", THEME.as_bytes())?;

        let mut image_number = 0;
        for (idx, part) in slides.iter().enumerate() {
            let number = idx + 1;
            let media_target = match part.image {
                Some(image) => {
                    image_number += 1;
                    let name = format!("image{}.{}", image_number, image.format.extension());
                    put(&format!("ppt/media/{}", name), &image.bytes)?;
                    Some(format!("../media/{}", name))
                }
                None => None,
            };

            put(
                &format!("ppt/slides/slide{}.xml", number),
                slide_xml(part.record, media_target.is_some()).as_bytes(),
            )?;

            let mut rels = vec![("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")];
            if let Some(target) = &media_target {
                rels.push(("rId2", REL_IMAGE, target.as_str()));
            }
            put(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                relationships(&rels).as_bytes(),
            )?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn content_types(&self, slides: &[SlidePart<'_>]) -> String {
        let mut formats: Vec<ImageFormat> = Vec::new();
        for image in slides.iter().filter_map(|s| s.image) {
            if !formats.contains(&image.format) {
                formats.push(image.format);
            }
        }

        let mut xml = format!(
            "{}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
            <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
            <Default Extension=\"xml\" ContentType=\"application/xml\"/>",
            XML_DECL
        );
        for format in formats {
            xml.push_str(&format!(
                "<Default Extension=\"{}\" ContentType=\"{}\"/>",
                format.extension(),
                format.content_type()
            ));
        }

        let overrides = [
            ("/ppt/presentation.xml", "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"),
            ("/ppt/slideMasters/slideMaster1.xml", "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"),
            ("/ppt/slideLayouts/slideLayout1.xml", "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"),
            ("/ppt/theme/theme1.xml", "application/vnd.openxmlformats-officedocument.theme+xml"),
            ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml"),
            ("/docProps/app.xml", "application/vnd.openxmlformats-officedocument.extended-properties+xml"),
        ];
        for (part, content_type) in overrides {
            xml.push_str(&format!(
                "<Override PartName=\"{}\" ContentType=\"{}\"/>",
                part, content_type
            ));
        }
        for number in 1..=slides.len() {
            xml.push_str(&format!(
                "<Override PartName=\"/ppt/slides/slide{}.xml\" \
                ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>",
                number
            ));
        }

        xml.push_str("</Types>");
        xml
    }

    fn core_props(&self) -> String {
        let created = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        format!(
            "{decl}<cp:coreProperties \
            xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
            xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
            xmlns:dcterms=\"http://purl.org/dc/terms/\" \
            xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
            <dc:title>{title}</dc:title>\
            <dc:creator>slide-deck-builder</dc:creator>\
            <dcterms:created xsi:type=\"dcterms:W3CDTF\">{created}</dcterms:created>\
            <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{created}</dcterms:modified>\
            </cp:coreProperties>",
            decl = XML_DECL,
            title = escape_xml(&self.title),
            created = created,
        )
    }
}

fn root_rels() -> String {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        ("rId2", REL_CORE_PROPS, "docProps/core.xml"),
        ("rId3", REL_EXT_PROPS, "docProps/app.xml"),
    ])
}

fn app_props(slide_count: usize) -> String {
    format!(
        "{}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\
        <Application>slide-deck-builder</Application>\
        <Slides>{}</Slides>\
        </Properties>",
        XML_DECL, slide_count
    )
}

fn presentation(slide_count: usize) -> String {
    let mut xml = format!(
        "{}<p:presentation xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
        <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>",
        XML_DECL, NS_A, NS_R, NS_P
    );

    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for idx in 0..slide_count {
            // Slide ids start at 256; relationship ids follow the master (rId1) and theme (rId2).
            xml.push_str(&format!(
                "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
                256 + idx,
                idx + 3
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }

    xml.push_str(&format!(
        "<p:sldSz cx=\"{}\" cy=\"{}\" type=\"screen4x3\"/>\
        <p:notesSz cx=\"{}\" cy=\"{}\"/>\
        </p:presentation>",
        SLIDE_WIDTH, SLIDE_HEIGHT, SLIDE_HEIGHT, SLIDE_WIDTH
    ));
    xml
}

fn presentation_rels(slide_count: usize) -> String {
    let slide_targets: Vec<(String, String)> = (1..=slide_count)
        .map(|n| (format!("rId{}", n + 2), format!("slides/slide{}.xml", n)))
        .collect();

    let mut rels = vec![
        ("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        ("rId2", REL_THEME, "theme/theme1.xml"),
    ];
    for (id, target) in &slide_targets {
        rels.push((id.as_str(), REL_SLIDE, target.as_str()));
    }
    relationships(&rels)
}

fn relationships(rels: &[(&str, &str, &str)]) -> String {
    let mut xml = format!("{}<Relationships xmlns=\"{}\">", XML_DECL, NS_PKG_RELS);
    for (id, rel_type, target) in rels {
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>",
            id, rel_type, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn slide_xml(record: &SlideRecord, has_image: bool) -> String {
    let body_rect = if has_image {
        BODY_WITH_IMAGE_RECT
    } else {
        BODY_RECT
    };

    let mut xml = format!(
        "{}<p:sld xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\"><p:cSld><p:spTree>\
        <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
        {}",
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        GROUP_SHAPE_PROPERTIES
    );

    xml.push_str(&text_box(
        2,
        "Title 1",
        TITLE_RECT,
        std::slice::from_ref(&record.title),
        3200,
        true,
    ));
    xml.push_str(&text_box(
        3,
        "Content 2",
        body_rect,
        &record.content_lines,
        1800,
        false,
    ));
    if has_image {
        xml.push_str(&picture(4, "Picture 3", IMAGE_RECT, "rId2"));
    }

    xml.push_str(
        "</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>",
    );
    xml
}

fn text_box(id: u32, name: &str, rect: Rect, lines: &[String], size: u32, bold: bool) -> String {
    let run_props = format!(
        "<a:rPr lang=\"en-US\" sz=\"{}\"{} dirty=\"0\"/>",
        size,
        if bold { " b=\"1\"" } else { "" }
    );

    let paragraphs = if lines.is_empty() {
        "<a:p><a:endParaRPr lang=\"en-US\" dirty=\"0\"/></a:p>".to_string()
    } else {
        // A line with embedded breaks becomes one paragraph per segment.
        lines
            .iter()
            .flat_map(|line| line.split('\n'))
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| {
                format!(
                    "<a:p><a:r>{}<a:t>{}</a:t></a:r></a:p>",
                    run_props,
                    escape_xml(line)
                )
            })
            .collect()
    };

    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
        <p:spPr>{xfrm}<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\
        <p:txBody><a:bodyPr wrap=\"square\" rtlCol=\"0\"><a:normAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody>\
        </p:sp>",
        id = id,
        name = name,
        xfrm = xfrm(rect),
        paragraphs = paragraphs,
    )
}

fn picture(id: u32, name: &str, rect: Rect, rel_id: &str) -> String {
    format!(
        "<p:pic><p:nvPicPr><p:cNvPr id=\"{id}\" name=\"{name}\"/>\
        <p:cNvPicPr><a:picLocks noChangeAspect=\"1\"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>\
        <p:blipFill><a:blip r:embed=\"{rel_id}\"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>\
        <p:spPr>{xfrm}<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr></p:pic>",
        id = id,
        name = name,
        rel_id = rel_id,
        xfrm = xfrm(rect),
    )
}

fn xfrm(rect: Rect) -> String {
    format!(
        "<a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>",
        rect.x, rect.y, rect.cx, rect.cy
    )
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab/newline are not legal in XML 1.0.
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}

const GROUP_SHAPE_PROPERTIES: &str = "<p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
    <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>";

const SLIDE_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst><p:txStyles><p:titleStyle><a:lvl1pPr algn="l"><a:defRPr sz="3200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr></a:lvl1pPr></p:titleStyle><p:bodyStyle><a:lvl1pPr marL="0" indent="0" algn="l"><a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr></p:bodyStyle><p:otherStyle><a:lvl1pPr><a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr></p:otherStyle></p:txStyles></p:sldMaster>"#;

const SLIDE_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1"><p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#;

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#;
