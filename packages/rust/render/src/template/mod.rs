//! Email-builder template document dialect.
//!
//! Spacing is carried by explicit empty break paragraphs inserted before
//! headers rather than by margins. The whole issue is emitted as the
//! builder's nested row/column/block document (see [`yaml`]).

mod yaml;

pub use yaml::escape_single_quotes;

use growthnews_shared::{ContentRecord, NewsletterBundle};
use tracing::debug;

use crate::summary::SummaryLine;
use crate::{
    BOOKING_URL, BRAND_NAME, COMPANION_SITE_URL, DEFAULT_COMPANION_TITLE, DEFAULT_SOCIAL_EXCERPT,
    Dialect, LOGO_URL, TOOL_IMAGE_URL, display_author, display_tag, display_title,
    display_tool_name, intro_items, render, tracked_url,
};
use yaml::{Node, list, map, null, plain, q};

const BREAK: &str = r#"<p class="default"><br></p>"#;
const LATO: &str = r#"<span style="font-family:lato;">"#;
const NORMAL_P: &str = r#"<p style="font-style:normal;font-weight:400;text-decoration-style:initial;text-decoration-thickness:initial;">"#;
const TAG_SPAN: &str = r#"<span style="background-color:#FFBEFA;color:#FFFFFF;font-family:lato;font-size:14px;font-style:italic;">"#;
const H2_SPAN: &str = r#"<span style="color:#232323;font-family:lato;font-size:32px;">"#;
const LINK_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;

pub(crate) fn assemble_summary(lines: &[SummaryLine]) -> String {
    let mut out = String::new();

    for (i, line) in lines.iter().enumerate() {
        if line.is_header() {
            if i > 0 {
                out.push_str(BREAK);
            }
            out.push_str(&format!(
                r#"<p class="default"><strong>{}</strong></p>"#,
                line.html
            ));
        } else {
            out.push_str(&format!(r#"<p class="default">{}</p>"#, line.html));
        }
    }

    out
}

/// Render a whole issue as an email-builder template document.
///
/// The builder layout needs every article and the tool: if any of the four is
/// missing the result is an empty string. Every interpolated value is
/// single-quote escaped.
pub fn render_template(bundle: &NewsletterBundle) -> String {
    let (Some(a1), Some(a2), Some(a3), Some(tool)) = (
        bundle.article1.as_ref(),
        bundle.article2.as_ref(),
        bundle.article3.as_ref(),
        bundle.tool.as_ref(),
    ) else {
        debug!("template document needs all three articles and the tool");
        return String::new();
    };

    let seq = bundle.sequence_id.as_str();

    let mut blocks = vec![
        text_block("Titre", Some("text-title"), String::new(), "20px", Some("20px")),
        logo_block(),
        text_block(
            "Titre",
            Some("text-title"),
            format!(
                r#"<p style="text-align:center;"><span style="color:#ffb7fa;font-family:syne;font-size:16px;"><strong>{BRAND_NAME} n° {seq}</strong></span></p>"#
            ),
            "0px",
            None,
        ),
        text_block("Texte", None, intro(bundle), "20px", Some("20px")),
        divider(),
        heading_block(format!(
            r#"<h2 class="default-heading2">{H2_SPAN}Les 3 meilleurs contenus de la semaine</span></h2>"#
        )),
    ];

    for article in [a1, a2, a3] {
        blocks.extend(article_blocks(article, seq));
    }

    blocks.push(divider());
    blocks.extend(tool_blocks(tool, seq));

    if bundle.companion.is_some() || bundle.social_post_url().is_some() {
        blocks.push(divider());
        blocks.extend(companion_blocks(bundle, seq));
    }

    blocks.push(divider());
    blocks.extend(footer_blocks());

    yaml::to_string(&document(blocks))
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn intro(bundle: &NewsletterBundle) -> String {
    let blank = format!("{NORMAL_P}&nbsp;</p>");
    let mut html = format!("{NORMAL_P}{LATO}Salut,</span></p>{blank}");
    html.push_str(&format!(
        "{NORMAL_P}{LATO}De retour pour {BRAND_NAME} !</span><br>{LATO}&nbsp;</span></p>"
    ));
    html.push_str(&format!(
        "{NORMAL_P}{LATO}Ce que vous allez découvrir cette semaine :</span></p>{blank}"
    ));
    for item in intro_items(bundle) {
        html.push_str(&format!("{NORMAL_P}{LATO}{item}</span></p>"));
    }
    html.push_str(&blank);
    html.push_str(&format!("{NORMAL_P}{LATO}Bonne lecture !&nbsp;</span></p>"));
    html
}

fn tag_block(record: &ContentRecord) -> Node {
    heading_block(format!(
        r#"<p class="default">{TAG_SPAN}{}</span></p>"#,
        display_tag(record)
    ))
}

fn article_blocks(article: &ContentRecord, seq: &str) -> [Node; 3] {
    let link = tracked_url(&article.url, seq, "&amp;");
    let title = display_title(article);
    let author = display_author(article);
    let body = render(&article.summary, Dialect::Template);

    [
        heading_block(format!(
            r#"<h3 class="default-heading3"><a href="{link}" {LINK_ATTRS}>{LATO}{title}</span></a></h3>"#
        )),
        tag_block(article),
        text_block(
            "Texte",
            None,
            format!(
                r#"{body}<p class="default"><a href="{link}" {LINK_ATTRS}><em>Lire l'article</em></a><em>&nbsp;by {author}</em></p>"#
            ),
            "0px",
            Some("20px"),
        ),
    ]
}

fn tool_blocks(tool: &ContentRecord, seq: &str) -> [Node; 4] {
    let link = tracked_url(&tool.url, seq, "&amp;");
    let name = display_tool_name(tool);

    [
        heading_block(format!(
            r#"<h2 class="default-heading2">{H2_SPAN}<strong>⚒️ L'outil de la Semaine : </strong></span><a href="{link}" {LINK_ATTRS}>{H2_SPAN}{name}</span></a></h2>"#
        )),
        tag_block(tool),
        image_block(TOOL_IMAGE_URL, name, Some(link.as_str()), "100%"),
        text_block(
            "Texte",
            None,
            render(&tool.summary, Dialect::Template),
            "0px",
            Some("20px"),
        ),
    ]
}

fn companion_blocks(bundle: &NewsletterBundle, seq: &str) -> [Node; 2] {
    let mut content = String::new();

    if let Some(companion) = &bundle.companion {
        let link = tracked_url(&companion.url, seq, "&amp;");
        let title = companion.title().unwrap_or(DEFAULT_COMPANION_TITLE);
        content.push_str(&format!(
            r#"<p><span style="color:#000000;font-family:lato;font-size:18px;">📚&nbsp;</span><span style="background-color:#ffb7fa;color:#000000;font-family:lato;font-size:18px;"><a href="{link}" {LINK_ATTRS}><em>ARTICLE &nbsp;:</em><em>&nbsp;</em></a></span> <em>{title}</em></p>"#
        ));
    }

    if let Some(url) = bundle.social_post_url() {
        let excerpt = bundle.social_post_excerpt().unwrap_or(DEFAULT_SOCIAL_EXCERPT);
        content.push_str(&format!(
            r#"<p><span style="background-color:#faf5ed;color:#000000;font-family:lato;font-size:18px;"><em>💼&nbsp;</em></span><a href="{url}" {LINK_ATTRS}><span style="background-color:#0077B5;color:#FFFFFF;font-family:lato;font-size:18px;"><em>LINKEDIN&nbsp;</em></span></a><span style="background-color:#0077B5;color:#FFFFFF;font-family:lato;font-size:18px;"><em>:&nbsp;</em></span><em>&nbsp;</em><em>{excerpt}</em></p>"#
        ));
    }

    let companion_link = COMPANION_SITE_URL.replace('&', "&amp;");
    [
        heading_block(format!(
            r#"<h2 class="default-heading2">{H2_SPAN}<strong>📖 Les ressources made by </strong></span>{H2_SPAN}<a href="{companion_link}" {LINK_ATTRS}><strong>deux.io</strong></a></span></h2>"#
        )),
        heading_block(content),
    ]
}

fn footer_blocks() -> [Node; 4] {
    [
        heading_block(format!(
            r#"<h2 class="default-heading2">{H2_SPAN}<strong>✌️ deux.io à votre service</strong></span></h2>"#
        )),
        heading_block(format!(
            r#"<p>{LATO}deux.io est une agence qui combine&nbsp;</span><span style="color:#ffb7fa;font-family:lato;"><strong>créativité, data et technologie pour accélérer la croissance des entreprises</strong></span>{LATO}<strong>.&nbsp;</strong></span></p><p>&nbsp;</p><p>{LATO}Nous aidons nos clients à optimiser leur acquisition, automatiser leurs workflows et booster leur ROI grâce à des stratégies innovantes et actionnables.</span></p><p>&nbsp;</p><p>{LATO}Notre mission : transformer vos objectifs business en résultats concrets.</span></p><p>&nbsp;</p><p>{LATO}Vous avez des questions, un message à nous faire passer ? Vous pouvez répondre à ce mail (on répond en 48 heures).</span></p><p>&nbsp;</p><p>{LATO}Si vous souhaitez vous faire accompagner 👇</span></p>"#
        )),
        button_block("Prendre rendez-vous", BOOKING_URL),
        heading_block(format!(
            "<p>{LATO}À la semaine prochaine</span></p><p>&nbsp;</p><p>{LATO}----</span></p><p>{LATO}La team deux.io</span></p>"
        )),
    ]
}

// ---------------------------------------------------------------------------
// Builder blocks
// ---------------------------------------------------------------------------

fn block(kind: &str, title: &str, module: Option<&str>, rest: Vec<(&str, Node)>) -> Node {
    let mut entries = vec![
        ("type", plain(kind)),
        ("thumbnail", null()),
        ("isCustomBlock", null()),
        ("customBlockId", null()),
        ("moduleName", module.map(plain).unwrap_or_else(null)),
        ("sidebarSection", null()),
        ("sync-module-id", null()),
        ("title", q(title)),
    ];
    entries.extend(rest);
    map(entries)
}

fn text_block(
    title: &str,
    module: Option<&str>,
    content: String,
    padding_top: &str,
    padding_bottom: Option<&str>,
) -> Node {
    let mut default = vec![("align", plain("left"))];
    if let Some(bottom) = padding_bottom {
        default.push(("padding-bottom", plain(bottom)));
    }
    default.extend([
        ("padding-top", plain(padding_top)),
        ("text-align", plain("left")),
        ("text-valign", plain("top")),
        ("width", plain("100%")),
        ("valign", plain("top")),
    ]);

    block(
        "text",
        title,
        module,
        vec![
            (
                "layout",
                map([
                    (
                        "320px",
                        map([
                            ("padding-left", plain("15px")),
                            ("padding-right", plain("15px")),
                            ("width", plain("100%")),
                        ]),
                    ),
                    ("default", map(default)),
                ]),
            ),
            ("content", q(content)),
        ],
    )
}

fn heading_block(content: String) -> Node {
    text_block("Titre", Some("text-title"), content, "0px", Some("10px"))
}

fn logo_block() -> Node {
    image_block(LOGO_URL, BRAND_NAME, None, "200px")
}

fn image_block(src: &str, alt: &str, href: Option<&str>, width: &str) -> Node {
    let mut content = vec![("src", q(src)), ("alt", q(alt))];
    if let Some(href) = href {
        content.push(("href", q(href)));
    }

    block(
        "image",
        "Image",
        None,
        vec![
            (
                "layout",
                map([
                    (
                        "320px",
                        map([("max-width", plain("320px")), ("width", plain("85%"))]),
                    ),
                    (
                        "default",
                        map([
                            ("align", plain("center")),
                            ("img-border-radius", plain("0px")),
                            ("padding-bottom", plain("10px")),
                            ("padding-top", plain("10px")),
                            ("width", plain(width)),
                            ("valign", plain("top")),
                        ]),
                    ),
                ]),
            ),
            ("content", map(content)),
        ],
    )
}

fn divider() -> Node {
    block(
        "divider",
        "Diviseur",
        None,
        vec![(
            "layout",
            map([
                ("320px", map([("width", plain("100%"))])),
                (
                    "default",
                    map([
                        ("align", plain("center")),
                        ("border-color", q("#232323")),
                        ("border-style", plain("dashed")),
                        ("border-width", plain("1px")),
                        ("padding-bottom", plain("15px")),
                        ("padding-top", plain("30px")),
                        ("width", plain("70%")),
                        ("valign", plain("top")),
                    ]),
                ),
            ]),
        )],
    )
}

fn button_block(label: &str, href: &str) -> Node {
    let text = format!(r#"<p><span style="font-family:lato;font-size:17px;">{label}</span></p>"#);
    block(
        "button",
        "Bouton",
        None,
        vec![
            ("text", q(text.clone())),
            (
                "layout",
                map([
                    (
                        "320px",
                        map([
                            ("padding-left", plain("10px")),
                            ("padding-right", plain("10px")),
                            ("width", plain("50%")),
                        ]),
                    ),
                    (
                        "default",
                        map([
                            ("align", plain("center")),
                            ("data-href", q(href)),
                            ("type", plain("absoluteLink")),
                            ("margin-bottom", plain("18px")),
                            ("margin-top", plain("18px")),
                            ("padding-bottom", plain("15px")),
                            ("padding-top", plain("15px")),
                            ("text-align", plain("center")),
                            ("width", plain("33%")),
                            ("valign", plain("top")),
                        ]),
                    ),
                ]),
            ),
            ("content", map([("text", q(text)), ("href", q(href))])),
        ],
    )
}

// ---------------------------------------------------------------------------
// Document skeleton
// ---------------------------------------------------------------------------

fn grid_row(module: &str, title: &str, hidden: bool, blocks: Vec<Node>) -> Node {
    let mut default = vec![("align", plain("center")), ("width", plain("100%"))];
    if hidden {
        default.push(("display", plain("none")));
    }
    default.push(("valign", plain("top")));

    map([
        ("type", plain("grid-row")),
        ("moduleName", plain(module)),
        ("align", plain("top")),
        ("title", q(title)),
        (
            "layout",
            map([
                (
                    "320px",
                    map([("display", plain("rows")), ("width", plain("100%"))]),
                ),
                ("default", map(default)),
            ]),
        ),
        (
            "content",
            list([map([
                ("type", plain("grid-column")),
                ("isEmpty", plain("false")),
                ("label", q("Drop content here")),
                ("title", q("colonne de grille")),
                (
                    "layout",
                    map([
                        ("320px", Node::Map(Vec::new())),
                        (
                            "default",
                            map([
                                ("padding-left", plain("0px")),
                                ("padding-right", plain("0px")),
                                ("valign", plain("top")),
                            ]),
                        ),
                    ]),
                ),
                ("content", list(blocks)),
            ])]),
        ),
        ("dist", q("12")),
        ("gutter", plain("0px")),
    ])
}

fn view_in_browser() -> Node {
    text_block(
        "Webversion",
        None,
        r#"<p><a href="{{ mirror }}"><span style="font-family: arial,helvetica,sans-serif;color:#858588;font-size: 12px; text-decoration: underline;">Afficher dans le navigateur</span></a></p>"#.to_string(),
        "5px",
        Some("5px"),
    )
}

fn style(title: &str, properties: Vec<(&str, Node)>) -> Node {
    map([("properties", map(properties)), ("title", q(title))])
}

fn heading_style(title: &str, size: &str) -> Node {
    style(
        title,
        vec![
            ("color", q("#232323")),
            ("font-family", plain("Syne")),
            ("font-size", plain(size)),
        ],
    )
}

fn document(blocks: Vec<Node>) -> Node {
    map([
        ("brandUpdateTime", q("2024-11-28T08:46:52.252Z")),
        ("firstLoadSocialIcons", plain("false")),
        ("hideSwapBanner", plain("false")),
        (
            "font-fallback",
            map([("default", plain("tahoma")), ("headings", plain("tahoma"))]),
        ),
        ("hasAIFeature", plain("true")),
        ("campaignType", plain("classic")),
        ("fieldsHistory", Node::List(Vec::new())),
        ("subject", q("{{objet}}")),
        (
            "ui",
            map([
                ("showDeleteOption", plain("false")),
                ("showMoreOption", plain("false")),
            ]),
        ),
        ("author", plain(r#""""#)),
        ("name", plain(r#""""#)),
        ("id", plain(r#""""#)),
        ("version", plain("3.0.1")),
        ("fields", Node::Map(Vec::new())),
        (
            "fonts",
            list([q("https://fonts.googleapis.com/css2?family=Syne&family=Lato")]),
        ),
        (
            "styles",
            map([
                (
                    "default",
                    style(
                        "Paragraph",
                        vec![
                            ("color", q("#232323")),
                            ("font-family", plain("Syne")),
                            ("font-size", plain("18px")),
                            ("line-height", q("1.5")),
                        ],
                    ),
                ),
                (
                    "default-button",
                    style(
                        "Button",
                        vec![
                            ("background-color", q("#232323")),
                            ("border-radius", plain("4px")),
                            ("color", q("#ffffff")),
                            ("font-family", plain("Syne")),
                            ("font-size", plain("16px")),
                        ],
                    ),
                ),
                ("default-heading1", heading_style("Heading 1", "36px")),
                ("default-heading2", heading_style("Heading 2", "32px")),
                ("default-heading3", heading_style("Heading 3", "24px")),
                ("default-heading4", heading_style("Heading 4", "22px")),
                (
                    "default-link",
                    style(
                        "Link",
                        vec![
                            ("color", q("#232323")),
                            ("text-decoration", plain("underline")),
                        ],
                    ),
                ),
            ]),
        ),
        (
            "media",
            map([(
                "320px",
                map([("max-width", plain("600")), ("min-width", plain("0"))]),
            )]),
        ),
        (
            "body",
            map([
                (
                    "content",
                    list([map([
                        ("type", plain("rows")),
                        ("content-type", plain("wrapper")),
                        ("title", plain("Wrapper")),
                        (
                            "layout",
                            map([
                                ("320px", map([("width", plain("320px"))])),
                                (
                                    "default",
                                    map([("align", plain("center")), ("valign", plain("top"))]),
                                ),
                            ]),
                        ),
                        (
                            "content",
                            list([
                                grid_row("viewInBrowser", "section", true, vec![view_in_browser()]),
                                grid_row("header", "Entête", false, blocks),
                            ]),
                        ),
                    ])]),
                ),
                (
                    "layout",
                    map([
                        (
                            "320px",
                            map([
                                ("padding-bottom", plain("20px")),
                                ("padding-top", plain("20px")),
                                ("width", plain("320px")),
                            ]),
                        ),
                        (
                            "default",
                            map([
                                ("background-color", q("#faf5ed")),
                                ("direction", plain("ltr")),
                                ("wrapper-width", plain("600px")),
                            ]),
                        ),
                    ]),
                ),
            ]),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::segment;
    use crate::test_support::*;

    fn summary_markup(summary: &str) -> String {
        assemble_summary(&segment(summary, None))
    }

    #[test]
    fn body_only_summary_has_no_breaks() {
        let markup = summary_markup("un\n\ndeux\ntrois");
        assert_eq!(
            markup,
            r#"<p class="default">un</p><p class="default">deux</p><p class="default">trois</p>"#
        );
    }

    #[test]
    fn break_precedes_every_header_but_a_leading_one() {
        let markup = summary_markup("# Un\ntexte\n# Deux\nfin");
        assert!(markup.starts_with(r#"<p class="default"><strong>Un</strong></p>"#));
        assert_eq!(markup.matches(BREAK).count(), 1);
        assert!(markup.contains(&format!(
            r#"{BREAK}<p class="default"><strong>Deux</strong></p>"#
        )));
    }

    #[test]
    fn header_after_body_gets_break_without_lookahead() {
        let markup = summary_markup("intro\n# Titre");
        assert_eq!(
            markup,
            format!(r#"<p class="default">intro</p>{BREAK}<p class="default"><strong>Titre</strong></p>"#)
        );
    }

    #[test]
    fn refuses_partial_bundles() {
        for strip in 0..4 {
            let mut bundle = full_bundle();
            match strip {
                0 => bundle.article1 = None,
                1 => bundle.article2 = None,
                2 => bundle.article3 = None,
                _ => bundle.tool = None,
            }
            assert_eq!(render_template(&bundle), "", "slot {strip} missing");
        }
    }

    #[test]
    fn complete_bundle_renders_every_section() {
        let doc = render_template(&full_bundle());
        assert!(doc.starts_with("brandUpdateTime: '2024-11-28T08:46:52.252Z'\n"));
        assert!(doc.contains("LaGrowthNews n° 142"));
        assert!(doc.contains("1️⃣ Titre un"));
        assert!(doc.contains("⚒️ L''outil de la semaine : Notion"));
        assert!(doc.contains(
            "https://example.com/three?utm_source=newsletter&amp;utm_medium=email&amp;utm_campaign=142"
        ));
        assert!(doc.contains("<em>&nbsp;by Chloé</em>"));
        assert!(doc.contains("🛠️ AUTOMATION"));
        assert!(doc.contains("ARTICLE &nbsp;:"));
        assert!(doc.contains("Le guide du growth"));
        assert!(doc.contains("Notre dernier post"));
        assert!(doc.contains("alt: 'Notion'"));
        assert!(doc.contains("Prendre rendez-vous"));
    }

    #[test]
    fn quotes_in_values_are_doubled() {
        let mut bundle = full_bundle();
        if let Some(a) = bundle.article1.as_mut() {
            a.summary = "it's here".into();
            a.author = Some("D'Artagnan".into());
            a.title = Some("L'essentiel du SEO".into());
            a.tag = Some("🤖 l'IA".into());
        }
        bundle.social_post_excerpt = Some("C'est parti".into());
        let doc = render_template(&bundle);
        assert!(doc.contains(r#"<p class="default">it''s here</p>"#));
        assert!(doc.contains("by D''Artagnan"));
        assert!(doc.contains("L''essentiel du SEO</span></a></h3>"));
        assert!(doc.contains("1️⃣ L''essentiel du SEO"));
        assert!(doc.contains(&format!("{TAG_SPAN}🤖 L''IA</span>")));
        assert!(doc.contains("<em>C''est parti</em>"));
        assert!(!doc.contains("C'est parti"));
        assert!(!doc.contains("it's here"));
        // No lone quote survives inside a quoted value.
        assert!(!doc.contains("Lire l'article"));
    }

    #[test]
    fn companion_section_is_optional() {
        let mut bundle = full_bundle();
        bundle.companion = None;
        bundle.social_post_url = None;
        let doc = render_template(&bundle);
        assert!(!doc.contains("Les ressources made by"));

        bundle.social_post_url = Some("https://linkedin.com/posts/2".into());
        bundle.social_post_excerpt = None;
        let doc = render_template(&bundle);
        assert!(doc.contains("Les ressources made by"));
        assert!(!doc.contains("ARTICLE &nbsp;:"));
        assert!(doc.contains(DEFAULT_SOCIAL_EXCERPT));
    }

    #[test]
    fn bare_bundle_uses_every_fallback() {
        let doc = render_template(&bare_bundle());
        assert_eq!(doc.matches("<em>&nbsp;by Auteur inconnu</em>").count(), 3);
        assert!(doc.contains("L''outil de la semaine : Outil"));
        assert!(doc.contains(&format!("{TAG_SPAN}</span>")));
        assert!(doc.contains("1️⃣ Big News"));
    }
}
