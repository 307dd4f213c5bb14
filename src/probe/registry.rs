//! The table of report probes.
//!
//! Each row of the report that depends on the Ruby installation is described
//! by a static [`ProbeDescriptor`]. The reporter walks the table in order,
//! evaluates the Ruby-backed ones in one batch, and renders each row
//! according to its [`ProbeKind`] and [`OnMissing`] policy.

use std::collections::BTreeSet;

use crate::report::kind::SectionKind;
use crate::report::kind::SectionKind::{Encodings, GemEnv, GemSettings, Libraries, Ruby, Ssl};
use crate::report::section::{COL_WIDTH, LIST_LABEL_WIDTH};

use super::fact::OnMissing;
use super::runtime::RubyQuery;
use super::tools::require_queries;

/// How a probe's value becomes report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// `label value`.
    Value,
    /// The value alone, highlighted.
    Headline,
    /// Two label/value pairs on one line.
    Pair {
        key2: &'static str,
        label2: &'static str,
        expression2: &'static str,
        value_width: usize,
        label2_width: usize,
    },
    /// A file or directory path, described by its status.
    Path,
    /// An environment variable holding a path (the expression is its name).
    EnvPath,
    /// `configure_args`, one flag per line.
    ConfigureArgs,
    /// A space separated signal list, wrapped into rows.
    Signals,
    /// Multi-line output printed as is, under a sub-heading when labelled.
    Listing,
    /// The TLS verification result.
    TlsVerify,
    /// Protocols supported by the verifier.
    TlsProtocols,
    /// An empty separator line.
    Blank,
}

impl ProbeKind {
    /// Whether the probe's value comes from the Ruby interpreter.
    pub fn uses_runtime(&self) -> bool {
        !matches!(
            self,
            ProbeKind::EnvPath | ProbeKind::TlsVerify | ProbeKind::TlsProtocols | ProbeKind::Blank
        )
    }
}

/// One report row backed by a capability lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub section: SectionKind,
    pub library: Option<&'static str>,
    pub expression: &'static str,
    pub indent: usize,
    pub label_width: usize,
    pub on_missing: OnMissing,
    /// Key of the probe this one depends on; skipped when that is missing.
    pub parent: Option<&'static str>,
    pub kind: ProbeKind,
}

impl ProbeDescriptor {
    const fn new(
        section: SectionKind,
        key: &'static str,
        label: &'static str,
        expression: &'static str,
        label_width: usize,
    ) -> Self {
        Self {
            key,
            label,
            section,
            library: None,
            expression,
            indent: 0,
            label_width,
            on_missing: OnMissing::NotFound,
            parent: None,
            kind: ProbeKind::Value,
        }
    }

    const fn blank(section: SectionKind) -> Self {
        Self::new(section, "", "", "", 0).kind(ProbeKind::Blank)
    }

    const fn lib(self, library: &'static str) -> Self {
        Self {
            library: Some(library),
            ..self
        }
    }

    const fn indent(self, indent: usize) -> Self {
        Self { indent, ..self }
    }

    const fn missing(self, on_missing: OnMissing) -> Self {
        Self { on_missing, ..self }
    }

    const fn child_of(self, parent: &'static str) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    const fn kind(self, kind: ProbeKind) -> Self {
        Self { kind, ..self }
    }

    /// The Ruby queries this probe needs.
    pub fn queries(&self) -> Vec<RubyQuery> {
        if !self.kind.uses_runtime() {
            return Vec::new();
        }
        let query = |key, expression| RubyQuery {
            key,
            library: self.library,
            expression,
        };
        let mut queries = vec![query(self.key, self.expression)];
        if let ProbeKind::Pair {
            key2, expression2, ..
        } = self.kind
        {
            queries.push(query(key2, expression2));
        }
        queries
    }
}

const RUBY_LABEL: usize = 21;
const BUILD_LABEL: usize = 18;
const RBCONFIG_LABEL: usize = 36;

/// Key of the OpenSSL parent probe.
pub const OPENSSL_KEY: &str = "openssl_version";

const WINDOWS_BUILD_INFO: &str = r#"if RUBY_PLATFORM =~ /mingw|mswin/
    fn = File.join(RbConfig::TOPDIR, 'lib/ruby/site_ruby', RbConfig::CONFIG['ruby_version'], 'ruby_installer/runtime/package_version.rb')
    if File.exist?(fn)
      s = File.read(fn)
      "RubyInstaller2 vers #{s[/^ *PACKAGE_VERSION *= *['"]([^'"]+)/, 1].to_s.strip}  commit #{s[/^ *GIT_COMMIT *= *['"]([^'"]+)/, 1].to_s.strip}"
    elsif RUBY_PLATFORM =~ /mingw/
      'RubyInstaller build?'
    else
      'NA'
    end
  end"#;

const SSL_CONTEXT_VERSIONS: &str = r##"ssl = OpenSSL::SSL
  ctx = ssl::SSLContext.new
  if ctx.respond_to?(:min_version=)
    %w[SSL2 SSL3 TLS1 TLS1_1 TLS1_2 TLS1_3].select { |n|
      c = "#{n}_VERSION"
      ssl.const_defined?(c) && (begin
        ctx.min_version = ssl.const_get(c)
        ctx.max_version = ssl.const_get(c)
        true
      rescue StandardError
        false
      end)
    }.join(' ')
  else
    ssl::SSLContext::METHODS.reject { |e| /client|server/ =~ e.to_s }.sort.join(' ')
  end"##;

const GEM_ENVIRONMENT: &str = r#"require 'stringio'
  ui = Gem::StreamUI.new(StringIO.new, StringIO.new, StringIO.new, false)
  cmd = Gem::Commands::EnvironmentCommand.new
  cmd.ui = ui
  cmd.options[:args] = []
  cmd.execute
  ui.outs.string"#;

/// Every probe, in report order.
pub const PROBES: &[ProbeDescriptor] = &[
    // Encodings
    ProbeDescriptor::new(Encodings, "enc_external", "default_external", "Encoding.default_external", LIST_LABEL_WIDTH)
        .missing(OnMissing::Text("unknown")),
    ProbeDescriptor::new(Encodings, "enc_internal", "default_internal", "Encoding.default_internal", LIST_LABEL_WIDTH)
        .missing(OnMissing::Text("unknown")),
    ProbeDescriptor::new(Encodings, "enc_filesystem", "filesystem", "Encoding.find('filesystem')", LIST_LABEL_WIDTH)
        .missing(OnMissing::Text("unknown")),
    ProbeDescriptor::new(Encodings, "enc_locale", "locale", "Encoding.find('locale')", LIST_LABEL_WIDTH)
        .missing(OnMissing::Text("unknown")),
    // Ruby
    ProbeDescriptor::new(Ruby, "ruby_description", "", "RUBY_DESCRIPTION", 0)
        .kind(ProbeKind::Headline),
    ProbeDescriptor::blank(Ruby),
    ProbeDescriptor::new(Ruby, "ruby_engine", "RUBY_ENGINE:", "defined?(RUBY_ENGINE) ? RUBY_ENGINE : nil", RUBY_LABEL),
    ProbeDescriptor::new(Ruby, "ruby_engine_version", "RUBY_ENGINE_VERSION:", "defined?(RUBY_ENGINE_VERSION) ? RUBY_ENGINE_VERSION : nil", RUBY_LABEL),
    ProbeDescriptor::new(Ruby, "ruby_platform", "RUBY_PLATFORM:", "RUBY_PLATFORM", RUBY_LABEL),
    ProbeDescriptor::new(Ruby, "ruby_patchlevel", "RUBY_PATCHLEVEL:", "RUBY_PATCHLEVEL", RUBY_LABEL),
    ProbeDescriptor::blank(Ruby),
    ProbeDescriptor::new(Ruby, "ruby_build_info", " Build Type/Info:", WINDOWS_BUILD_INFO, BUILD_LABEL)
        .lib("rbconfig")
        .missing(OnMissing::Omit),
    ProbeDescriptor::new(Ruby, "gcc_info", "        gcc info:", "(m = RbConfig::CONFIG['CC_VERSION_MESSAGE']) ? m[/\\A.*$/].strip : nil", BUILD_LABEL)
        .lib("rbconfig")
        .missing(OnMissing::Omit),
    ProbeDescriptor::new(Ruby, "rbconfig_topdir", "RbConfig::TOPDIR:", "RbConfig::TOPDIR", BUILD_LABEL)
        .lib("rbconfig"),
    ProbeDescriptor::blank(Ruby),
    ProbeDescriptor::new(Ruby, "libruby_so", "RbConfig::CONFIG['LIBRUBY_SO']:", "RbConfig::CONFIG['LIBRUBY_SO']", RBCONFIG_LABEL)
        .lib("rbconfig"),
    ProbeDescriptor::new(Ruby, "libruby_soname", "RbConfig::CONFIG['LIBRUBY_SONAME']:", "RbConfig::CONFIG['LIBRUBY_SONAME']", RBCONFIG_LABEL)
        .lib("rbconfig"),
    ProbeDescriptor::new(Ruby, "rbconfig_ruby_version", "RbConfig::CONFIG['ruby_version']:", "RbConfig::CONFIG['ruby_version']", RBCONFIG_LABEL)
        .lib("rbconfig"),
    ProbeDescriptor::new(Ruby, "rbconfig_dlext", "RbConfig::CONFIG['DLEXT']:", "RbConfig::CONFIG['DLEXT']", RBCONFIG_LABEL)
        .lib("rbconfig"),
    ProbeDescriptor::new(Ruby, "rbconfig_host_os", "RbConfig::CONFIG['host_os']:", "RbConfig::CONFIG['host_os']", RBCONFIG_LABEL)
        .lib("rbconfig"),
    ProbeDescriptor::blank(Ruby),
    ProbeDescriptor::new(Ruby, "configure_args", "RbConfig::CONFIG['configure_args']:", "RbConfig::CONFIG['configure_args']", 0)
        .lib("rbconfig")
        .missing(OnMissing::Omit)
        .kind(ProbeKind::ConfigureArgs),
    ProbeDescriptor::blank(Ruby),
    ProbeDescriptor::new(Ruby, "signals", "Available signals:", "Signal.list.keys.sort.join(' ')", 0)
        .missing(OnMissing::Omit)
        .kind(ProbeKind::Signals),
    ProbeDescriptor::blank(Ruby),
    ProbeDescriptor::new(Ruby, "load_path", "$LOAD_PATH", "$LOAD_PATH.join(\"\\n\")", 0)
        .missing(OnMissing::Omit)
        .kind(ProbeKind::Listing),
    // Libraries
    ProbeDescriptor::new(Libraries, "gem_version", "Gem::VERSION", "Gem::VERSION", COL_WIDTH[2])
        .lib("rubygems"),
    ProbeDescriptor::new(Libraries, "bundler_version", "Bundler::VERSION", "Bundler::VERSION", COL_WIDTH[2])
        .lib("bundler"),
    ProbeDescriptor::blank(Libraries),
    ProbeDescriptor::new(Libraries, "bigdecimal_version", "BigDecimal.ver", "BigDecimal.const_defined?(:VERSION) ? BigDecimal::VERSION : BigDecimal.ver", COL_WIDTH[2])
        .lib("bigdecimal"),
    ProbeDescriptor::new(Libraries, "gdbm_version", "GDBM::VERSION", "GDBM::VERSION", COL_WIDTH[2])
        .lib("gdbm"),
    ProbeDescriptor::new(Libraries, "json_version", "JSON::VERSION", "JSON::VERSION", COL_WIDTH[2])
        .lib("json/ext"),
    ProbeDescriptor::blank(Libraries),
    ProbeDescriptor::new(Libraries, "psych_version", "Psych::VERSION", "Psych::VERSION", COL_WIDTH[3])
        .lib("psych")
        .kind(ProbeKind::Pair {
            key2: "libyaml_version",
            label2: "LIBYAML_VERSION",
            expression2: "Psych::LIBYAML_VERSION",
            value_width: COL_WIDTH[1],
            label2_width: COL_WIDTH[2],
        }),
    ProbeDescriptor::new(Libraries, "readline_version", "Readline::VERSION", "Readline::VERSION", COL_WIDTH[3])
        .lib("readline")
        .missing(OnMissing::Omit),
    ProbeDescriptor::new(Libraries, "zlib_version", "Zlib::VERSION", "Zlib::VERSION", COL_WIDTH[3])
        .lib("zlib")
        .kind(ProbeKind::Pair {
            key2: "zlib_library_version",
            label2: "ZLIB_VERSION",
            expression2: "Zlib::ZLIB_VERSION",
            value_width: COL_WIDTH[1],
            label2_width: COL_WIDTH[2],
        }),
    ProbeDescriptor::new(Libraries, "gmp_version", "Integer::GMP_VERSION", "Integer.const_defined?(:GMP_VERSION) ? Integer::GMP_VERSION : 'Unknown'", COL_WIDTH[3])
        .missing(OnMissing::Text("Unknown")),
    // OpenSSL
    ProbeDescriptor::new(Ssl, OPENSSL_KEY, "OpenSSL::VERSION", "OpenSSL::VERSION", COL_WIDTH[0])
        .lib("openssl"),
    ProbeDescriptor::new(Ssl, "ssl_verify", "SSL Verify", "", COL_WIDTH[0])
        .indent(4)
        .child_of(OPENSSL_KEY)
        .kind(ProbeKind::TlsVerify),
    ProbeDescriptor::new(Ssl, "openssl_library", "OPENSSL_VERSION", "OpenSSL::OPENSSL_VERSION", COL_WIDTH[0])
        .lib("openssl")
        .indent(4)
        .missing(OnMissing::Omit)
        .child_of(OPENSSL_KEY),
    ProbeDescriptor::new(Ssl, "openssl_library_version", "OPENSSL_LIBRARY_VERSION", "OpenSSL.const_defined?(:OPENSSL_LIBRARY_VERSION) ? OpenSSL::OPENSSL_LIBRARY_VERSION : 'Not Defined'", COL_WIDTH[0])
        .lib("openssl")
        .indent(4)
        .missing(OnMissing::Text("Not Defined"))
        .child_of(OPENSSL_KEY),
    ProbeDescriptor::new(Ssl, "ssl_context_versions", "SSLContext Versions", SSL_CONTEXT_VERSIONS, COL_WIDTH[0])
        .lib("openssl")
        .indent(4)
        .missing(OnMissing::Omit)
        .child_of(OPENSSL_KEY),
    ProbeDescriptor::new(Ssl, "verifier_protocols", "Available Protocols", "", COL_WIDTH[0])
        .indent(4)
        .child_of(OPENSSL_KEY)
        .kind(ProbeKind::TlsProtocols),
    ProbeDescriptor::blank(Ssl).child_of(OPENSSL_KEY),
    ProbeDescriptor::new(Ssl, "default_cert_file", "X509::DEFAULT_CERT_FILE", "OpenSSL::X509::DEFAULT_CERT_FILE", COL_WIDTH[0])
        .lib("openssl")
        .indent(4)
        .missing(OnMissing::Omit)
        .child_of(OPENSSL_KEY)
        .kind(ProbeKind::Path),
    ProbeDescriptor::new(Ssl, "default_cert_dir", "X509::DEFAULT_CERT_DIR", "OpenSSL::X509::DEFAULT_CERT_DIR", COL_WIDTH[0])
        .lib("openssl")
        .indent(4)
        .missing(OnMissing::Omit)
        .child_of(OPENSSL_KEY)
        .kind(ProbeKind::Path),
    ProbeDescriptor::new(Ssl, "default_config_file", "Config::DEFAULT_CONFIG_FILE", "OpenSSL::Config::DEFAULT_CONFIG_FILE", COL_WIDTH[0])
        .lib("openssl")
        .indent(4)
        .missing(OnMissing::Omit)
        .child_of(OPENSSL_KEY)
        .kind(ProbeKind::Path),
    ProbeDescriptor::blank(Ssl).child_of(OPENSSL_KEY),
    ProbeDescriptor::new(Ssl, "env_ssl_cert_file", "ENV['SSL_CERT_FILE']", "SSL_CERT_FILE", COL_WIDTH[0])
        .indent(4)
        .child_of(OPENSSL_KEY)
        .kind(ProbeKind::EnvPath),
    ProbeDescriptor::new(Ssl, "env_ssl_cert_dir", "ENV['SSL_CERT_DIR']", "SSL_CERT_DIR", COL_WIDTH[0])
        .indent(4)
        .child_of(OPENSSL_KEY)
        .kind(ProbeKind::EnvPath),
    ProbeDescriptor::new(Ssl, "env_openssl_conf", "ENV['OPENSSL_CONF']", "OPENSSL_CONF", COL_WIDTH[0])
        .indent(4)
        .child_of(OPENSSL_KEY)
        .kind(ProbeKind::EnvPath),
    // Gem settings
    ProbeDescriptor::new(GemSettings, "gem_bindir", "bindir", "Gem.bindir", LIST_LABEL_WIDTH)
        .lib("rubygems")
        .missing(OnMissing::Text("not defined")),
    ProbeDescriptor::new(GemSettings, "gem_default_dir", "default_dir", "Gem.default_dir", LIST_LABEL_WIDTH)
        .lib("rubygems")
        .missing(OnMissing::Text("not defined")),
    ProbeDescriptor::new(GemSettings, "gem_dir", "dir", "Gem.dir", LIST_LABEL_WIDTH)
        .lib("rubygems")
        .missing(OnMissing::Text("not defined")),
    ProbeDescriptor::new(GemSettings, "gem_path", "path", "Gem.path", LIST_LABEL_WIDTH)
        .lib("rubygems")
        .missing(OnMissing::Text("not defined")),
    ProbeDescriptor::new(GemSettings, "gem_user_home", "user_home", "Gem.user_home", LIST_LABEL_WIDTH)
        .lib("rubygems")
        .missing(OnMissing::Text("not defined")),
    ProbeDescriptor::new(GemSettings, "gem_user_dir", "user_dir", "Gem.user_dir", LIST_LABEL_WIDTH)
        .lib("rubygems")
        .missing(OnMissing::Text("not defined")),
    ProbeDescriptor::new(GemSettings, "gem_spec_cache_dir", "spec_cache_dir", "Gem.spec_cache_dir", LIST_LABEL_WIDTH)
        .lib("rubygems")
        .missing(OnMissing::Text("not defined")),
    // Gem environment
    ProbeDescriptor::new(GemEnv, "gem_environment", "", GEM_ENVIRONMENT, 0)
        .lib("rubygems/commands/environment_command")
        .kind(ProbeKind::Listing),
];

/// Keys of facts the reporter needs beyond the printed probes.
pub mod keys {
    pub const RUBY_VERSION: &str = "ruby_version";
    pub const HOST_PLATFORM: &str = "host_platform";
    pub const RUBY_BINDIR: &str = "ruby_bindir";
    pub const GEM_PLATFORMS: &str = "gem_platforms";
    pub const DEFAULT_SPEC_DIR: &str = "default_spec_dir";
    pub const BUNDLED_SPEC_DIR: &str = "bundled_spec_dir";
    pub const INSTALLED_SPEC_DIR: &str = "installed_spec_dir";
    pub const USER_SPEC_DIR: &str = "user_spec_dir";
}

/// Supporting queries: interpreter identity, tool gating, and gem locations.
pub const SUPPORT_QUERIES: &[RubyQuery] = &[
    RubyQuery::new(keys::RUBY_VERSION, "RUBY_VERSION"),
    RubyQuery::new(keys::HOST_PLATFORM, "RUBY_PLATFORM"),
    RubyQuery::with_library(keys::RUBY_BINDIR, "rbconfig", "RbConfig::CONFIG['bindir']"),
    RubyQuery::with_library(
        keys::GEM_PLATFORMS,
        "rubygems",
        "Gem.platforms.map(&:to_s).reject { |p| p == 'ruby' }.join(' ')",
    ),
    RubyQuery::with_library(
        keys::DEFAULT_SPEC_DIR,
        "rubygems",
        "Gem.respond_to?(:default_specifications_dir) ? Gem.default_specifications_dir : File.join(Gem.default_dir, 'specifications', 'default')",
    ),
    RubyQuery::with_library(
        keys::BUNDLED_SPEC_DIR,
        "rubygems",
        "File.join(Gem.default_dir, 'specifications')",
    ),
    RubyQuery::with_library(
        keys::INSTALLED_SPEC_DIR,
        "rubygems",
        "File.join(Gem.dir, 'specifications')",
    ),
    RubyQuery::with_library(
        keys::USER_SPEC_DIR,
        "rubygems",
        "File.join(Gem.user_dir, 'specifications')",
    ),
];

/// Probes belonging to one section, in order.
pub fn probes_for(section: SectionKind) -> impl Iterator<Item = &'static ProbeDescriptor> {
    PROBES.iter().filter(move |p| p.section == section)
}

/// Every Ruby query needed to render the given sections.
pub fn queries_for(sections: &BTreeSet<SectionKind>) -> Vec<RubyQuery> {
    let mut queries: Vec<RubyQuery> = PROBES
        .iter()
        .filter(|p| sections.contains(&p.section))
        .flat_map(|p| p.queries())
        .collect();
    queries.extend_from_slice(SUPPORT_QUERIES);
    if sections.contains(&SectionKind::CliTools) {
        queries.extend(require_queries());
    }
    queries
}
