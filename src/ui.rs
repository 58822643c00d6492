use crate::models::{ContactDraft, DonationDraft, Page, StatsSnapshot, SubmissionStatus};
use crate::stats::format_amount;
use crate::store::SiteState;
use chrono::{Datelike, Local};

pub const QUICK_AMOUNTS: [u32; 4] = [25, 50, 100, 250];

pub fn render_page(state: &SiteState, refresh_after_secs: u64) -> String {
    let body = match state.page {
        Page::Home => render_home(&state.stats),
        Page::About => ABOUT_HTML.to_string(),
        Page::Donate => render_donate(&state.donation, state.status),
        Page::Stories => render_stories(),
        Page::Contact => render_contact(&state.contact, state.status),
    };

    // Lets the browser pick up the banner reverting to idle.
    let refresh = if state.status.is_terminal() {
        format!(r#"<meta http-equiv="refresh" content="{}" />"#, refresh_after_secs.max(1))
    } else {
        String::new()
    };

    let updated = state
        .stats_refreshed_at
        .map(|at| format!("Totals updated {}", at.format("%H:%M:%S")))
        .unwrap_or_default();

    fill(
        LAYOUT_HTML,
        &[
            ("TITLE", state.page.title()),
            ("REFRESH", refresh.as_str()),
            ("NAV", render_nav(state.page).as_str()),
            ("BODY", body.as_str()),
            ("UPDATED", updated.as_str()),
            ("YEAR", Local::now().year().to_string().as_str()),
        ],
    )
}

fn render_nav(current: Page) -> String {
    Page::ALL
        .iter()
        .map(|page| {
            let class = if *page == current { "nav-link active" } else { "nav-link" };
            format!(
                r#"<form method="post" action="/navigate/{selector}"><button class="{class}" type="submit">{title}</button></form>"#,
                selector = page.selector(),
                title = page.title(),
            )
        })
        .collect()
}

fn render_home(stats: &StatsSnapshot) -> String {
    fill(
        HOME_HTML,
        &[
            ("TOTAL_AMOUNT", format_amount(stats.total_amount).as_str()),
            ("TOTAL_DONATIONS", stats.total_donations.to_string().as_str()),
            ("TOTAL_CONTACTS", stats.total_contacts.to_string().as_str()),
        ],
    )
}

fn render_donate(draft: &DonationDraft, status: SubmissionStatus) -> String {
    let presets: String = QUICK_AMOUNTS
        .iter()
        .map(|amount| {
            let class = if draft.amount == amount.to_string() { "preset selected" } else { "preset" };
            format!(
                r#"<button class="{class}" type="submit" formaction="/donate/amount/{amount}" formnovalidate>${amount}</button>"#
            )
        })
        .collect();

    let label = if status == SubmissionStatus::Submitting {
        "Processing...".to_string()
    } else {
        let amount = if draft.amount.is_empty() { "0" } else { draft.amount.as_str() };
        format!("Donate ${}", escape_html(amount))
    };

    fill(
        DONATE_HTML,
        &[
            ("PRESETS", presets.as_str()),
            ("AMOUNT", escape_html(&draft.amount).as_str()),
            ("DONOR_NAME", escape_html(&draft.donor_name).as_str()),
            ("DONOR_EMAIL", escape_html(&draft.donor_email).as_str()),
            ("MESSAGE", escape_html(&draft.message).as_str()),
            ("DISABLED", disabled_attr(status)),
            ("STATUS", status_attr(status)),
            ("LABEL", label.as_str()),
            (
                "BANNER",
                banner(
                    status,
                    "Thank you! Your donation has been processed successfully. You'll receive a confirmation email shortly.",
                    "There was an error processing your donation. Please try again.",
                ),
            ),
        ],
    )
}

fn render_contact(draft: &ContactDraft, status: SubmissionStatus) -> String {
    let label = if status == SubmissionStatus::Submitting { "Sending..." } else { "Send Message" };

    fill(
        CONTACT_HTML,
        &[
            ("NAME", escape_html(&draft.name).as_str()),
            ("EMAIL", escape_html(&draft.email).as_str()),
            ("MESSAGE", escape_html(&draft.message).as_str()),
            ("DISABLED", disabled_attr(status)),
            ("STATUS", status_attr(status)),
            ("LABEL", label),
            (
                "BANNER",
                banner(
                    status,
                    "Thank you for your message! We'll get back to you soon.",
                    "There was an error sending your message. Please try again.",
                ),
            ),
        ],
    )
}

fn render_stories() -> String {
    let cards: String = STORIES
        .iter()
        .map(|story| {
            format!(
                r#"<article class="story"><img src="{image}" alt="{title}" /><div><h3>{title}</h3><p>{body}</p><p class="impact">Impact: {impact}</p></div></article>"#,
                image = story.image,
                title = story.title,
                body = story.body,
                impact = story.impact,
            )
        })
        .collect();
    fill(STORIES_HTML, &[("STORIES", cards.as_str())])
}

/// Substitutes `{{KEY}}` placeholders in a single pass. Inserted values are
/// never scanned again, so user text containing `{{...}}` stays as typed.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn disabled_attr(status: SubmissionStatus) -> &'static str {
    if status == SubmissionStatus::Submitting { "disabled" } else { "" }
}

fn banner(status: SubmissionStatus, success: &'static str, error: &'static str) -> &'static str {
    match status {
        SubmissionStatus::Success => success,
        SubmissionStatus::Error => error,
        SubmissionStatus::Idle | SubmissionStatus::Submitting => "",
    }
}

fn status_attr(status: SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::Idle => "idle",
        SubmissionStatus::Submitting => "submitting",
        SubmissionStatus::Success => "success",
        SubmissionStatus::Error => "error",
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

struct Story {
    image: &'static str,
    title: &'static str,
    body: &'static str,
    impact: &'static str,
}

const STORIES: [Story; 4] = [
    Story {
        image: "https://images.pexels.com/photos/13415997/pexels-photo-13415997.jpeg",
        title: "The Malika Family",
        body: "After fleeing conflict in their hometown, the Malika family found refuge in a displacement camp. With HopeBridge's support, they received emergency shelter, clean water, and medical care. Today, their children are healthy and attending school in the camp.",
        impact: "Shelter, clean water, and medical care provided",
    },
    Story {
        image: "https://images.unsplash.com/photo-1727698980749-ae2eb9482bb6",
        title: "Amara and Kira",
        body: "Sisters Amara and Kira lost their parents during a conflict but found hope through our community support program. They now live with their grandmother and attend local school thanks to donations that cover their education and daily needs.",
        impact: "Education, daily meals, and emotional support",
    },
    Story {
        image: "https://images.pexels.com/photos/28101461/pexels-photo-28101461.jpeg",
        title: "Clean Water for Kofi",
        body: "8-year-old Kofi used to walk miles every day to fetch water that often made his family sick. Thanks to HopeBridge donors, a clean water pump was installed in his village, giving him time to go to school instead of searching for water.",
        impact: "Clean water access for entire village of 200+ families",
    },
    Story {
        image: "https://images.unsplash.com/photo-1697665387559-253e7a645e96",
        title: "Community Recovery",
        body: "The village of Tendara was devastated by conflict, but through collective support and donations, the community has rebuilt. Families have come together to reconstruct homes, restore their school, and create a sustainable future.",
        impact: "Entire community rebuilding with 50+ families helped",
    },
];

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  {{REFRESH}}
  <title>HopeBridge | {{TITLE}}</title>
  <style>
    :root {
      --ink: #1f2937;
      --muted: #4b5563;
      --accent: #2563eb;
      --accent-soft: #eff6ff;
      --ok: #15803d;
      --err: #b91c1c;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(37, 99, 235, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: #f9fafb;
      color: var(--ink);
      font-family: "Inter", "Trebuchet MS", sans-serif;
    }

    nav {
      position: sticky;
      top: 0;
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 12px 24px;
      background: white;
      box-shadow: 0 2px 10px rgba(0, 0, 0, 0.06);
    }

    nav .brand {
      font-size: 1.5rem;
      font-weight: 700;
      color: var(--accent);
    }

    nav .links {
      display: flex;
      gap: 6px;
    }

    nav form {
      margin: 0;
    }

    .nav-link {
      border: none;
      background: transparent;
      padding: 8px 12px;
      border-radius: 8px;
      font-weight: 500;
      color: var(--muted);
      cursor: pointer;
    }

    .nav-link.active {
      background: var(--accent);
      color: white;
    }

    main {
      width: min(960px, 100%);
      margin: 0 auto;
      padding: 40px 20px 64px;
      display: grid;
      gap: 32px;
    }

    h1 {
      font-size: clamp(2rem, 4vw, 3rem);
      margin: 0;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 28px;
    }

    .impact-grid,
    .presets {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .impact-grid .value {
      font-size: 2.2rem;
      font-weight: 700;
      color: var(--accent);
    }

    form.stacked {
      display: grid;
      gap: 16px;
    }

    input,
    textarea {
      width: 100%;
      padding: 12px;
      border: 1px solid #d1d5db;
      border-radius: 10px;
      font: inherit;
    }

    .preset {
      padding: 12px;
      border: 2px solid #d1d5db;
      border-radius: 10px;
      background: white;
      font-weight: 600;
      cursor: pointer;
    }

    .preset.selected {
      border-color: var(--accent);
      background: var(--accent-soft);
      color: var(--accent);
    }

    .primary {
      padding: 14px 20px;
      border: none;
      border-radius: 10px;
      background: var(--accent);
      color: white;
      font-size: 1.05rem;
      font-weight: 600;
      cursor: pointer;
    }

    .primary:disabled {
      opacity: 0.6;
      cursor: not-allowed;
    }

    .banner {
      min-height: 1.2em;
      font-weight: 500;
    }

    .banner[data-status="success"] {
      color: var(--ok);
    }

    .banner[data-status="error"] {
      color: var(--err);
    }

    .story {
      display: grid;
      grid-template-columns: 200px 1fr;
      gap: 20px;
    }

    .story img {
      width: 100%;
      border-radius: 12px;
      object-fit: cover;
    }

    .story .impact {
      color: var(--accent);
      font-weight: 600;
    }

    footer {
      text-align: center;
      color: var(--muted);
      padding: 24px;
      font-size: 0.9rem;
    }

    @media (max-width: 640px) {
      nav {
        flex-direction: column;
        gap: 8px;
      }
      .story {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <nav>
    <form method="post" action="/navigate/home"><button class="nav-link brand" type="submit">HopeBridge</button></form>
    <div class="links">{{NAV}}</div>
  </nav>
  <main>
{{BODY}}
  </main>
  <footer>
    <p>&copy; {{YEAR}} HopeBridge. Building bridges of hope across the world.</p>
    <p>{{UPDATED}}</p>
  </footer>
</body>
</html>
"#;

const HOME_HTML: &str = r#"    <section class="card">
      <h1>Building Bridges of Hope</h1>
      <p>Together, we can provide life-saving aid to families affected by conflict and crisis in African countries and around the world.</p>
      <form method="post" action="/navigate/donate"><button class="primary" type="submit">Donate Now</button></form>
    </section>
    <section>
      <h2>Our Mission</h2>
      <p>HopeBridge is dedicated to providing humanitarian aid to those affected by war and conflict, focusing on African countries and global crisis zones where help is needed most.</p>
      <div class="impact-grid">
        <div class="card"><h3>Direct Aid</h3><p>Providing essential supplies, food, and medical aid directly to those in need.</p></div>
        <div class="card"><h3>Restoring Hope</h3><p>Bringing hope and dignity back to communities devastated by conflict.</p></div>
        <div class="card"><h3>Community Unity</h3><p>Building stronger communities through support and solidarity.</p></div>
      </div>
    </section>
    <section class="card" id="impact">
      <h2>Our Impact So Far</h2>
      <div class="impact-grid">
        <div><div class="value" id="total-amount">${{TOTAL_AMOUNT}}</div><div>Total Raised</div></div>
        <div><div class="value" id="total-donations">{{TOTAL_DONATIONS}}</div><div>Donations Made</div></div>
        <div><div class="value" id="total-contacts">{{TOTAL_CONTACTS}}</div><div>Messages Received</div></div>
        <div><div class="value">50+</div><div>Families Helped</div></div>
      </div>
    </section>"#;

const ABOUT_HTML: &str = r#"    <section class="card">
      <h1>About HopeBridge</h1>
      <h2>Our Vision</h2>
      <p>We envision a world where no one suffers alone during times of crisis. HopeBridge was founded with the belief that through collective action, we can build bridges of hope that span across continents and cultures, connecting those who can help with those who need it most.</p>
      <h2>Our Mission</h2>
      <p>HopeBridge is committed to providing immediate humanitarian relief to individuals and families affected by war, conflict, and displacement, with a special focus on African countries and global crisis zones.</p>
      <h2>Why We Focus on Conflict Zones</h2>
      <p>Wars and conflicts disproportionately affect the most vulnerable populations, leaving millions without access to basic necessities. HopeBridge directs resources where they are needed most.</p>
      <h2>Our Approach</h2>
      <ul>
        <li>Direct aid delivery to ensure maximum impact</li>
        <li>Partnership with local organizations for sustainable support</li>
        <li>Transparent use of donations with regular impact reports</li>
        <li>Cultural sensitivity and respect for local communities</li>
        <li>Long-term rehabilitation and community rebuilding</li>
      </ul>
      <p><em>"There is always hope. Together, we can make a difference."</em></p>
    </section>"#;

const DONATE_HTML: &str = r#"    <section class="card">
      <h1>Make a Donation</h1>
      <p>Your generosity can change lives. Every donation, no matter the size, makes a real difference for families affected by conflict and crisis.</p>
      <form class="stacked" id="donation-form" method="post" action="/donate">
        <label>Choose Amount</label>
        <div class="presets">{{PRESETS}}</div>
        <input type="number" name="amount" placeholder="Custom amount" value="{{AMOUNT}}" required min="1" step="0.01" />
        <label>Full Name <input type="text" name="donor_name" value="{{DONOR_NAME}}" required /></label>
        <label>Email Address <input type="email" name="donor_email" value="{{DONOR_EMAIL}}" required /></label>
        <label>Message (Optional) <textarea name="message" rows="4" placeholder="Share why you're donating or leave a message of hope...">{{MESSAGE}}</textarea></label>
        <button class="primary" type="submit" {{DISABLED}}>{{LABEL}}</button>
      </form>
      <p class="banner" id="status" data-status="{{STATUS}}">{{BANNER}}</p>
    </section>
    <section class="card">
      <h3>How Your Donation Helps:</h3>
      <ul>
        <li>$25 provides clean water for a family for one week</li>
        <li>$50 supplies emergency food packages for two families</li>
        <li>$100 provides medical care for 10 children</li>
        <li>$250 builds temporary shelter for a displaced family</li>
      </ul>
    </section>"#;

const STORIES_HTML: &str = r#"    <section>
      <h1>Stories of Hope</h1>
      <p>Every donation creates a story of hope. Meet some of the families and individuals whose lives have been transformed through the generosity of our donors.</p>
    </section>
    <section class="card">{{STORIES}}</section>
    <section class="card">
      <h2>Your Donation Creates the Next Story</h2>
      <p>Join thousands of others who are making a difference in lives affected by conflict and crisis.</p>
      <form method="post" action="/navigate/donate"><button class="primary" type="submit">Donate Now</button></form>
    </section>"#;

const CONTACT_HTML: &str = r#"    <section>
      <h1>Contact Us</h1>
      <p>Have questions about our work or want to get involved? We'd love to hear from you.</p>
    </section>
    <section class="impact-grid">
      <div class="card">
        <h2>Get in Touch</h2>
        <h3>Email</h3><p>contact@hopebridge.org</p>
        <h3>Phone</h3><p>+1 (555) 123-HOPE</p>
        <h3>Address</h3><p>123 Hope Street<br />Humanitarian District<br />Global City, GC 12345</p>
      </div>
      <div class="card">
        <form class="stacked" id="contact-form" method="post" action="/contact">
          <label>Name <input type="text" name="name" value="{{NAME}}" required /></label>
          <label>Email <input type="email" name="email" value="{{EMAIL}}" required /></label>
          <label>Message <textarea name="message" rows="5" required placeholder="Tell us how we can help or how you'd like to get involved...">{{MESSAGE}}</textarea></label>
          <button class="primary" type="submit" {{DISABLED}}>{{LABEL}}</button>
        </form>
        <p class="banner" id="status" data-status="{{STATUS}}">{{BANNER}}</p>
      </div>
    </section>"#;
