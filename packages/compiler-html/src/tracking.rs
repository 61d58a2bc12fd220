//! Analytics snippets for the configured trackers.
//!
//! Each enabled tracker with a non-empty id contributes a `<head>` fragment
//! and, where the vendor provides one, a `<noscript>` fragment for the top of
//! `<body>`.

use cloudpage_compiler_script::ssjs::js_string;
use cloudpage_model::TrackingConfig;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingSnippets {
    pub head: Vec<String>,
    pub body: Vec<String>,
}

impl TrackingSnippets {
    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.body.is_empty()
    }
}

pub fn tracking_snippets(config: &TrackingConfig) -> TrackingSnippets {
    let mut snippets = TrackingSnippets::default();

    if let Some(id) = config.gtm.active_id() {
        snippets.head.push(format!(
            "<script>(function(w,d,s,l,i){{w[l]=w[l]||[];w[l].push({{'gtm.start':new Date().getTime(),event:'gtm.js'}});var f=d.getElementsByTagName(s)[0],j=d.createElement(s),dl=l!='dataLayer'?'&l='+l:'';j.async=true;j.src='https://www.googletagmanager.com/gtm.js?id='+i+dl;f.parentNode.insertBefore(j,f);}})(window,document,'script','dataLayer',{});</script>",
            js_string(id)
        ));
        snippets.body.push(format!(
            r#"<noscript><iframe src="https://www.googletagmanager.com/ns.html?id={}" height="0" width="0" style="display:none;visibility:hidden"></iframe></noscript>"#,
            urlencoding::encode(id)
        ));
    }

    if let Some(id) = config.ga4.active_id() {
        snippets.head.push(format!(
            "<script async src=\"https://www.googletagmanager.com/gtag/js?id={}\"></script>\n<script>window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config',{});</script>",
            urlencoding::encode(id),
            js_string(id)
        ));
    }

    if let Some(id) = config.meta_pixel.active_id() {
        snippets.head.push(format!(
            "<script>!function(f,b,e,v,n,t,s){{if(f.fbq)return;n=f.fbq=function(){{n.callMethod?n.callMethod.apply(n,arguments):n.queue.push(arguments)}};if(!f._fbq)f._fbq=n;n.push=n;n.loaded=!0;n.version='2.0';n.queue=[];t=b.createElement(e);t.async=!0;t.src=v;s=b.getElementsByTagName(e)[0];s.parentNode.insertBefore(t,s)}}(window,document,'script','https://connect.facebook.net/en_US/fbevents.js');fbq('init',{});fbq('track','PageView');</script>",
            js_string(id)
        ));
        snippets.body.push(format!(
            r#"<noscript><img height="1" width="1" style="display:none" alt="" src="https://www.facebook.com/tr?id={}&ev=PageView&noscript=1"></noscript>"#,
            urlencoding::encode(id)
        ));
    }

    if let Some(id) = config.linkedin.active_id() {
        snippets.head.push(format!(
            "<script>_linkedin_partner_id={};window._linkedin_data_partner_ids=window._linkedin_data_partner_ids||[];window._linkedin_data_partner_ids.push(_linkedin_partner_id);(function(l){{if(!l){{window.lintrk=function(a,b){{window.lintrk.q.push([a,b])}};window.lintrk.q=[]}}var s=document.getElementsByTagName('script')[0];var b=document.createElement('script');b.type='text/javascript';b.async=true;b.src='https://snap.licdn.com/li.lms-analytics/insight.min.js';s.parentNode.insertBefore(b,s);}})(window.lintrk);</script>",
            js_string(id)
        ));
        snippets.body.push(format!(
            r#"<noscript><img height="1" width="1" style="display:none;" alt="" src="https://px.ads.linkedin.com/collect/?pid={}&fmt=gif"></noscript>"#,
            urlencoding::encode(id)
        ));
    }

    debug!(head = snippets.head.len(), body = snippets.body.len(), "Built tracking snippets");
    snippets
}
