//! Self-contained HTML email dialect.
//!
//! Spacing is carried by inline CSS margins: a body line directly followed by
//! a header drops its bottom margin, and every header but one opening the
//! summary gets a top margin.

use growthnews_shared::{ContentRecord, NewsletterBundle};
use tracing::debug;

use crate::summary::SummaryLine;
use crate::{
    BOOKING_URL, BRAND_NAME, COMPANION_SITE_URL, DEFAULT_COMPANION_TITLE, DEFAULT_SOCIAL_EXCERPT,
    Dialect, LOGO_URL, TOOL_IMAGE_URL, display_author, display_tag, display_title,
    display_tool_name, intro_items, render, tracked_url,
};

/// Font, size, line-height and color shared by every text block.
const TEXT_STYLE: &str =
    "font-family: Lato, sans-serif; font-size: 18px; line-height: 1.5; color: #232323;";

pub(crate) const LINK_STYLE: &str = "color: #232323; text-decoration: underline;";

const HEADER_MARGIN_TOP: &str = "20px";
const BODY_MARGIN_BOTTOM: &str = "10px";

const TAG_STYLE: &str = "display: inline-block; background-color: #FFBEFA; color: #FFFFFF; padding: 4px 10px; font-family: Lato, sans-serif; font-size: 14px; font-style: italic;";
const H2_STYLE: &str = "margin: 0; font-family: Lato, sans-serif; font-size: 32px; color: #232323;";
const H3_STYLE: &str = "margin: 0; font-family: Lato, sans-serif; font-size: 24px; color: #232323;";
const TITLE_LINK_STYLE: &str = "color: #232323; text-decoration: none;";

pub(crate) fn assemble_summary(lines: &[SummaryLine]) -> String {
    let mut out = String::new();

    for (i, line) in lines.iter().enumerate() {
        if line.is_header() {
            let top = if i > 0 { HEADER_MARGIN_TOP } else { "0" };
            out.push_str(&format!(
                r#"<p style="margin: {top} 0 0 0; {TEXT_STYLE}"><strong>{}</strong></p>"#,
                line.html
            ));
        } else {
            let next_is_header = lines.get(i + 1).is_some_and(SummaryLine::is_header);
            let bottom = if next_is_header { "0" } else { BODY_MARGIN_BOTTOM };
            out.push_str(&format!(
                r#"<p style="margin: 0 0 {bottom} 0; {TEXT_STYLE}">{}</p>"#,
                line.html
            ));
        }
    }

    out
}

/// Render a whole issue as a standalone HTML email.
///
/// Any subset of the three articles and the tool is rendered; absent sections
/// are omitted. Returns an empty string when none of the four is present.
pub fn render_email(bundle: &NewsletterBundle) -> String {
    let [a1, a2, a3] = bundle.articles();
    if a1.is_none() && a2.is_none() && a3.is_none() && bundle.tool.is_none() {
        debug!("no article or tool present, skipping email render");
        return String::new();
    }

    let seq = bundle.sequence_id.as_str();
    let mut html = String::new();

    html.push_str(&document_head(seq));
    html.push_str(&intro(bundle));
    html.push_str(DIVIDER_FIRST);
    html.push_str(&format!(
        r#"
          <tr>
            <td style="padding: 15px 40px;">
              <h2 style="{H2_STYLE}">Les 3 meilleurs contenus de la semaine</h2>
            </td>
          </tr>
"#
    ));

    for (index, article) in bundle.articles().into_iter().enumerate() {
        if let Some(article) = article {
            html.push_str(&article_section(index, article, seq));
        }
    }

    if let Some(tool) = &bundle.tool {
        html.push_str(DIVIDER);
        html.push_str(&tool_section(tool, seq));
    }

    let social_url = bundle.social_post_url();
    if bundle.companion.is_some() || social_url.is_some() {
        html.push_str(DIVIDER);
        html.push_str(&companion_section(bundle, seq));
    }

    html.push_str(DIVIDER);
    html.push_str(&footer());

    html
}

const DIVIDER_FIRST: &str = r#"
          <tr>
            <td align="center" style="padding: 15px 40px;">
              <hr style="border: none; border-top: 1px dashed #232323; width: 70%; margin: 0;">
            </td>
          </tr>
"#;

const DIVIDER: &str = r#"
          <tr>
            <td align="center" style="padding: 30px 40px 15px 40px;">
              <hr style="border: none; border-top: 1px dashed #232323; width: 70%; margin: 0;">
            </td>
          </tr>
"#;

fn document_head(seq: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <link href="https://fonts.googleapis.com/css2?family=Syne:wght@400;600;700&family=Lato:wght@400;700&display=swap" rel="stylesheet">
  <title>{BRAND_NAME} n° {seq}</title>
</head>
<body style="margin: 0; padding: 0; font-family: Lato, sans-serif; background-color: #faf5ed;">
  <table width="100%" cellpadding="0" cellspacing="0" border="0" style="background-color: #faf5ed;">
    <tr>
      <td align="center" style="padding: 20px 0;">
        <table width="600" cellpadding="0" cellspacing="0" border="0" style="background-color: #ffffff;">
          <tr>
            <td align="center" style="padding: 30px 20px 20px 20px;">
              <img src="{LOGO_URL}" alt="{BRAND_NAME}" width="200" style="display: block; margin: 0 auto;">
            </td>
          </tr>
          <tr>
            <td align="center" style="padding: 0 20px 20px 20px;">
              <p style="margin: 0; font-family: Syne, sans-serif; font-size: 16px; color: #ffb7fa; font-weight: 600;">{BRAND_NAME} n° {seq}</p>
            </td>
          </tr>
"#
    )
}

fn intro(bundle: &NewsletterBundle) -> String {
    let items: String = intro_items(bundle)
        .iter()
        .map(|item| format!(r#"<p style="margin: 5px 0; {TEXT_STYLE}">{item}</p>"#))
        .collect();

    format!(
        r#"
          <tr>
            <td style="padding: 20px 40px;">
              <p style="margin: 0 0 10px 0; {TEXT_STYLE}">Salut,</p>
              <p style="margin: 10px 0; {TEXT_STYLE}">De retour pour {BRAND_NAME} !</p>
              <p style="margin: 10px 0; {TEXT_STYLE}">Ce que vous allez découvrir cette semaine :</p>
              {items}
              <p style="margin: 10px 0 0 0; {TEXT_STYLE}">Bonne lecture !</p>
            </td>
          </tr>
"#
    )
}

fn tag_row(record: &ContentRecord) -> String {
    format!(
        r#"
          <tr>
            <td style="padding: 5px 40px;">
              <span style="{TAG_STYLE}">{}</span>
            </td>
          </tr>
"#,
        display_tag(record)
    )
}

fn article_section(index: usize, article: &ContentRecord, seq: &str) -> String {
    let link = tracked_url(&article.url, seq, "&");
    let title = display_title(article);
    let author = display_author(article);
    let body = render(&article.summary, Dialect::Email);
    // The first article sits right under the section title.
    let top = if index == 0 { "15px" } else { "30px" };

    format!(
        r#"
          <tr>
            <td style="padding: {top} 40px 0 40px;">
              <h3 style="{H3_STYLE}">
                <a href="{link}" style="{TITLE_LINK_STYLE}">{title}</a>
              </h3>
            </td>
          </tr>
{tag}
          <tr>
            <td style="padding: 15px 40px;">
              {body}
              <p style="margin: 15px 0 0 0; {TEXT_STYLE}">
                <a href="{link}" style="{LINK_STYLE}"><em>Lire l'article</em></a>
                <em> by {author}</em>
              </p>
            </td>
          </tr>
"#,
        tag = tag_row(article),
    )
}

fn tool_section(tool: &ContentRecord, seq: &str) -> String {
    let link = tracked_url(&tool.url, seq, "&");
    let name = display_tool_name(tool);
    let body = render(&tool.summary, Dialect::Email);

    format!(
        r#"
          <tr>
            <td style="padding: 15px 40px;">
              <h2 style="{H2_STYLE}">
                <strong>⚒️ L'outil de la Semaine : </strong>
                <a href="{link}" style="{TITLE_LINK_STYLE}">{name}</a>
              </h2>
            </td>
          </tr>
{tag}
          <tr>
            <td align="center" style="padding: 15px 40px;">
              <a href="{link}">
                <img src="{TOOL_IMAGE_URL}" alt="{name}" width="100%" style="display: block; max-width: 520px;">
              </a>
            </td>
          </tr>
          <tr>
            <td style="padding: 15px 40px;">
              {body}
            </td>
          </tr>
"#,
        tag = tag_row(tool),
    )
}

fn companion_section(bundle: &NewsletterBundle, seq: &str) -> String {
    let article = bundle
        .companion
        .as_ref()
        .map(|companion| {
            let link = tracked_url(&companion.url, seq, "&");
            let title = companion.title().unwrap_or(DEFAULT_COMPANION_TITLE);
            format!(
                r#"<p style="margin: 0 0 10px 0; {TEXT_STYLE}">
                📚 <span style="background-color: #ffb7fa; padding: 2px 8px;"><a href="{link}" style="color: #000000; text-decoration: none;"><em>ARTICLE :</em></a></span> <em>{title}</em>
              </p>"#
            )
        })
        .unwrap_or_default();

    let social = bundle
        .social_post_url()
        .map(|url| {
            let excerpt = bundle.social_post_excerpt().unwrap_or(DEFAULT_SOCIAL_EXCERPT);
            format!(
                r#"<p style="margin: 0; {TEXT_STYLE}">
                <em>💼 </em><a href="{url}"><span style="background-color: #0077B5; padding: 2px 8px; color: #FFFFFF;"><em>LINKEDIN</em></span></a><span style="background-color: #0077B5; padding: 2px 8px; color: #FFFFFF;"><em>:</em></span> <em>{excerpt}</em>
              </p>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"
          <tr>
            <td style="padding: 15px 40px;">
              <h2 style="{H2_STYLE}">
                <strong>📖 Les ressources made by </strong>
                <a href="{COMPANION_SITE_URL}" style="{TITLE_LINK_STYLE}"><strong>deux.io</strong></a>
              </h2>
            </td>
          </tr>
          <tr>
            <td style="padding: 15px 40px;">
              {article}
              {social}
            </td>
          </tr>
"#
    )
}

fn footer() -> String {
    format!(
        r#"
          <tr>
            <td style="padding: 15px 40px;">
              <h2 style="margin: 0 0 15px 0; font-family: Lato, sans-serif; font-size: 32px; color: #232323;"><strong>✌️ deux.io à votre service</strong></h2>
              <p style="margin: 0 0 10px 0; {TEXT_STYLE}">
                deux.io est une agence qui combine <span style="color: #ffb7fa;"><strong>créativité, data et technologie pour accélérer la croissance des entreprises</strong></span>.
              </p>
              <p style="margin: 10px 0; {TEXT_STYLE}">
                Nous aidons nos clients à optimiser leur acquisition, automatiser leurs workflows et booster leur ROI grâce à des stratégies innovantes et actionnables.
              </p>
              <p style="margin: 10px 0; {TEXT_STYLE}">
                Notre mission : transformer vos objectifs business en résultats concrets.
              </p>
              <p style="margin: 10px 0; {TEXT_STYLE}">
                Vous avez des questions, un message à nous faire passer ? Vous pouvez répondre à ce mail (on répond en 48 heures).
              </p>
              <p style="margin: 10px 0 20px 0; {TEXT_STYLE}">
                Si vous souhaitez vous faire accompagner 👇
              </p>
            </td>
          </tr>
          <tr>
            <td align="center" style="padding: 0 40px 30px 40px;">
              <a href="{BOOKING_URL}" style="display: inline-block; background-color: #232323; color: #ffffff; font-family: Lato, sans-serif; font-size: 17px; padding: 15px 40px; text-decoration: none; border-radius: 4px;">
                Prendre rendez-vous
              </a>
            </td>
          </tr>
          <tr>
            <td style="padding: 0 40px 40px 40px;">
              <p style="margin: 0; {TEXT_STYLE}">À la semaine prochaine</p>
              <p style="margin: 10px 0 0 0; {TEXT_STYLE}">----</p>
              <p style="margin: 5px 0 0 0; {TEXT_STYLE}">La team deux.io</p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#
    )
}
