//! Built-in template table.
//!
//! Maps every template identifier the core can select to an output path
//! pattern and a content body. Both are rendered with `{{variable}}`
//! substitution against the node's merged context (see `emitter`).
//!
//! Paths are project-relative; `{{modulePath}}` anchors module files
//! under their module directory.

use mason_core::domain::TemplateId;

/// One renderable template.
pub struct TemplateSpec {
    pub id: &'static str,
    pub path: &'static str,
    pub body: &'static str,
}

/// Look up the spec for a template id.
pub fn spec(id: TemplateId) -> Option<&'static TemplateSpec> {
    ALL.iter().find(|t| t.id == id.as_str())
}

/// Every built-in template.
pub fn all() -> &'static [TemplateSpec] {
    ALL
}

static ALL: &[TemplateSpec] = &[
    // ── project root ──────────────────────────────────────────────────
    TemplateSpec {
        id: "project/pom",
        path: "pom.xml",
        body: r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>

    <groupId>{{groupId}}</groupId>
    <artifactId>{{artifactId}}</artifactId>
    <version>{{version}}</version>
    <packaging>pom</packaging>

    <name>{{appTitle}}</name>
    <description>{{appTitle}} - reactor project</description>

    <modules>
{{moduleList}}
    </modules>

    <properties>
        <aem.version>{{aemVersion}}</aem.version>
        <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
        <maven.compiler.release>11</maven.compiler.release>
    </properties>

    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>{{platformApiGroupId}}</groupId>
                <artifactId>{{platformApiArtifactId}}</artifactId>
                <version>{{platformApiVersion}}</version>
                <scope>provided</scope>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>
"#,
    },
    TemplateSpec {
        id: "project/gitignore",
        path: ".gitignore",
        body: r#"target/
*.iml
.idea/
.vscode/
.DS_Store
"#,
    },
    TemplateSpec {
        id: "project/readme",
        path: "README.md",
        body: r#"# {{appTitle}}

Multi-module Maven project targeting AEM ({{aemVersion}}).

## Building

    mvn clean install

## Modules

See `<modules>` in the reactor `pom.xml`. Module records live in
`.mason.toml`; re-running mason against this directory reconfigures
modules in place.

Generated by mason, {{currentYear}}.
"#,
    },
    // ── app ───────────────────────────────────────────────────────────
    TemplateSpec {
        id: "app/pom",
        path: "{{modulePath}}/pom.xml",
        body: r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>

    <parent>
        <groupId>{{groupId}}</groupId>
        <artifactId>{{parentArtifactId}}</artifactId>
        <version>{{version}}</version>
    </parent>

    <artifactId>{{artifactId}}</artifactId>
    <packaging>jar</packaging>
    <name>{{appTitle}} - Core Bundle</name>

    <dependencies>
        <dependency>
            <groupId>{{platformApiGroupId}}</groupId>
            <artifactId>{{platformApiArtifactId}}</artifactId>
            <version>{{platformApiVersion}}</version>
            <scope>provided</scope>
        </dependency>
        <dependency>
            <groupId>org.junit.jupiter</groupId>
            <artifactId>junit-jupiter</artifactId>
            <version>5.10.2</version>
            <scope>test</scope>
        </dependency>
    </dependencies>

    <build>
        <plugins>
            <plugin>
                <groupId>biz.aQute.bnd</groupId>
                <artifactId>bnd-maven-plugin</artifactId>
                <version>7.0.0</version>
                <executions>
                    <execution>
                        <goals>
                            <goal>bnd-process</goal>
                        </goals>
                    </execution>
                </executions>
            </plugin>
        </plugins>
    </build>
</project>
"#,
    },
    TemplateSpec {
        id: "app/package-info",
        path: "{{modulePath}}/src/main/java/{{packagePath}}/core/package-info.java",
        body: r#"@Version("1.0.0")
package {{package}}.core;

import org.osgi.annotation.versioning.Version;
"#,
    },
    TemplateSpec {
        id: "app/sample-servlet",
        path: "{{modulePath}}/src/main/java/{{packagePath}}/core/servlets/SimpleServlet.java",
        body: r#"package {{package}}.core.servlets;

import java.io.IOException;

import javax.servlet.Servlet;

import org.apache.sling.api.SlingHttpServletRequest;
import org.apache.sling.api.SlingHttpServletResponse;
import org.apache.sling.api.servlets.SlingSafeMethodsServlet;
import org.osgi.service.component.annotations.Component;

/**
 * Example servlet mapped to the page resource type. Responds with the
 * title of the requested resource.
 */
@Component(service = Servlet.class, property = {
        "sling.servlet.resourceTypes=" + SimpleServlet.RESOURCE_TYPE,
        "sling.servlet.extensions=txt"
})
public class SimpleServlet extends SlingSafeMethodsServlet {

    static final String RESOURCE_TYPE = "{{artifactId}}/components/page";

    private static final long serialVersionUID = 1L;

    @Override
    protected void doGet(final SlingHttpServletRequest request,
            final SlingHttpServletResponse response) throws IOException {
        final String title = request.getResource().getValueMap()
                .get("jcr:title", "{{appTitle}}");
        response.setContentType("text/plain");
        response.getWriter().write("Title = " + title);
    }
}
"#,
    },
    TemplateSpec {
        id: "app/sample-servlet-test",
        path: "{{modulePath}}/src/test/java/{{packagePath}}/core/servlets/SimpleServletTest.java",
        body: r#"package {{package}}.core.servlets;

import static org.junit.jupiter.api.Assertions.assertEquals;

import org.junit.jupiter.api.Test;

class SimpleServletTest {

    @Test
    void resourceTypeIsNamespaced() {
        assertEquals("{{artifactId}}/components/page", SimpleServlet.RESOURCE_TYPE);
    }
}
"#,
    },
    TemplateSpec {
        id: "app/publish-runmode-config",
        path: "{{modulePath}}/src/main/resources/configs/publish/caching.cfg.json",
        body: r#"{
  "cache.control.header": "max-age=3600",
  "comment": "Served only on publish instances of {{appTitle}}"
}
"#,
    },
    // ── tests-it ──────────────────────────────────────────────────────
    TemplateSpec {
        id: "tests-it/pom",
        path: "{{modulePath}}/pom.xml",
        body: r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>

    <parent>
        <groupId>{{groupId}}</groupId>
        <artifactId>{{parentArtifactId}}</artifactId>
        <version>{{version}}</version>
    </parent>

    <artifactId>{{artifactId}}</artifactId>
    <packaging>jar</packaging>
    <name>{{appTitle}} - Integration Tests</name>

    <dependencies>
        <dependency>
            <groupId>{{testingClientGroupId}}</groupId>
            <artifactId>{{testingClientArtifactId}}</artifactId>
            <version>{{testingClientVersion}}</version>
        </dependency>
        <dependency>
            <groupId>{{platformApiGroupId}}</groupId>
            <artifactId>{{platformApiArtifactId}}</artifactId>
            <version>{{platformApiVersion}}</version>
            <scope>provided</scope>
        </dependency>
    </dependencies>

    <build>
        <plugins>
            <plugin>
                <groupId>org.apache.maven.plugins</groupId>
                <artifactId>maven-failsafe-plugin</artifactId>
                <version>3.2.5</version>
                <executions>
                    <execution>
                        <goals>
                            <goal>integration-test</goal>
                            <goal>verify</goal>
                        </goals>
                    </execution>
                </executions>
            </plugin>
        </plugins>
    </build>
</project>
"#,
    },
    TemplateSpec {
        id: "tests-it/test-base",
        path: "{{modulePath}}/src/main/java/{{packagePath}}/it/tests/TestBase.java",
        body: r#"package {{package}}.it.tests;

import com.adobe.cq.testing.junit.rules.CQAuthorPublishClassRule;
import com.adobe.cq.testing.junit.rules.CQRule;

import org.junit.ClassRule;
import org.junit.Rule;

/**
 * Shared rule chain for integration tests. Binds each test run to the
 * author (and, where configured, publish) instance under test.
 */
public abstract class TestBase {

    @ClassRule
    public static final CQAuthorPublishClassRule cqBaseClassRule =
            new CQAuthorPublishClassRule();

    @Rule
    public CQRule cqBaseRule = new CQRule(cqBaseClassRule.authorRule);
}
"#,
    },
    TemplateSpec {
        id: "tests-it/create-page-it",
        path: "{{modulePath}}/src/main/java/{{packagePath}}/it/tests/CreatePageIT.java",
        body: r#"package {{package}}.it.tests;

import static org.junit.Assert.assertTrue;

import com.adobe.cq.testing.client.CQClient;

import org.apache.sling.testing.clients.ClientException;
import org.junit.BeforeClass;
import org.junit.Test;

public class CreatePageIT extends TestBase {

    private static CQClient adminAuthor;

    @BeforeClass
    public static void beforeClass() {
        adminAuthor = cqBaseClassRule.authorRule.getAdminClient(CQClient.class);
    }

    @Test
    public void createsAndDeletesAPage() throws ClientException {
        final String parent = "/content/{{parentArtifactId}}";
        adminAuthor.createPage("it-page", "IT Page", parent, "").checkStatus(201);
        try {
            assertTrue(adminAuthor.exists(parent + "/it-page"));
        } finally {
            adminAuthor.deletePage(new String[] { parent + "/it-page" }, true, false);
        }
    }
}
"#,
    },
    TemplateSpec {
        id: "tests-it/publish-smoke-it",
        path: "{{modulePath}}/src/main/java/{{packagePath}}/it/tests/PublishEndpointIT.java",
        body: r#"package {{package}}.it.tests;

import com.adobe.cq.testing.client.CQClient;

import org.apache.sling.testing.clients.ClientException;
import org.junit.BeforeClass;
import org.junit.Test;

/** Smoke check that the publish tier serves the site root. */
public class PublishEndpointIT extends TestBase {

    private static CQClient anonymousPublish;

    @BeforeClass
    public static void beforeClass() {
        anonymousPublish = cqBaseClassRule.publishRule.getClient(CQClient.class, null, null);
    }

    @Test
    public void siteRootIsServed() throws ClientException {
        anonymousPublish.doGet("/content/{{parentArtifactId}}.html", 200, 301, 302);
    }
}
"#,
    },
    // ── ui-config ─────────────────────────────────────────────────────
    TemplateSpec {
        id: "ui-config/pom",
        path: "{{modulePath}}/pom.xml",
        body: r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>

    <parent>
        <groupId>{{groupId}}</groupId>
        <artifactId>{{parentArtifactId}}</artifactId>
        <version>{{version}}</version>
    </parent>

    <artifactId>{{artifactId}}</artifactId>
    <packaging>content-package</packaging>
    <name>{{appTitle}} - Runtime Configuration</name>

    <build>
        <plugins>
            <plugin>
                <groupId>org.apache.jackrabbit</groupId>
                <artifactId>filevault-package-maven-plugin</artifactId>
                <version>1.3.6</version>
                <extensions>true</extensions>
                <configuration>
                    <packageType>container</packageType>
                    <validatorsSettings>
                        <jackrabbit-filter>
                            <options>
                                <validRoots>/apps/{{parentArtifactId}}</validRoots>
                            </options>
                        </jackrabbit-filter>
                    </validatorsSettings>
                </configuration>
            </plugin>
        </plugins>
    </build>
</project>
"#,
    },
    TemplateSpec {
        id: "ui-config/logging-config",
        path: "{{modulePath}}/src/main/content/jcr_root/apps/{{parentArtifactId}}/osgiconfig/config/org.apache.sling.commons.log.LogManager.factory.config~{{parentArtifactId}}.cfg.json",
        body: r#"{
  "org.apache.sling.commons.log.file": "logs/{{parentArtifactId}}.log",
  "org.apache.sling.commons.log.level": "info",
  "org.apache.sling.commons.log.names": [
    "{{package}}"
  ]
}
"#,
    },
    TemplateSpec {
        id: "ui-config/publish-logging-config",
        path: "{{modulePath}}/src/main/content/jcr_root/apps/{{parentArtifactId}}/osgiconfig/config.publish/org.apache.sling.commons.log.LogManager.factory.config~{{parentArtifactId}}.cfg.json",
        body: r#"{
  "org.apache.sling.commons.log.file": "logs/{{parentArtifactId}}.log",
  "org.apache.sling.commons.log.level": "warn",
  "org.apache.sling.commons.log.names": [
    "{{package}}"
  ]
}
"#,
    },
    // ── dispatcher ────────────────────────────────────────────────────
    TemplateSpec {
        id: "dispatcher/pom",
        path: "{{modulePath}}/pom.xml",
        body: r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>

    <parent>
        <groupId>{{groupId}}</groupId>
        <artifactId>{{parentArtifactId}}</artifactId>
        <version>{{version}}</version>
    </parent>

    <artifactId>{{artifactId}}</artifactId>
    <packaging>pom</packaging>
    <name>{{appTitle}} - Dispatcher</name>
</project>
"#,
    },
    TemplateSpec {
        id: "dispatcher/author-farm",
        path: "{{modulePath}}/src/conf.dispatcher.d/farms/author.farm",
        body: r#"/author
{
    /clientheaders {
        "*"
    }
    /virtualhosts {
        "*"
    }
    /renders {
        /rend01 {
            /hostname "localhost"
            /port "4502"
        }
    }
    /filter {
        /0001 { /type "deny" /url "*" }
        /0002 { /type "allow" /url "/content/{{parentArtifactId}}/*" }
    }
}
"#,
    },
    TemplateSpec {
        id: "dispatcher/publish-farm",
        path: "{{modulePath}}/src/conf.dispatcher.d/farms/publish.farm",
        body: r#"/publish
{
    /clientheaders {
        "*"
    }
    /virtualhosts {
        "*"
    }
    /renders {
        /rend01 {
            /hostname "localhost"
            /port "4503"
        }
    }
    /cache {
        /docroot "/var/www/html"
        /rules {
            /0000 { /glob "*" /type "allow" }
        }
    }
    /filter {
        /0001 { /type "deny" /url "*" }
        /0002 { /type "allow" /url "/content/{{parentArtifactId}}/*" }
    }
}
"#,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use mason_core::domain::{ModuleKind, PropertyBag, keys, module_templates, project_templates};

    #[test]
    fn every_selectable_template_has_a_spec() {
        // Run the selectors with every flag raised; anything they can
        // ever produce must be in the table.
        let all_flags = PropertyBag::new()
            .with(keys::PUBLISH, true)
            .with(keys::EXAMPLES, true);

        for id in project_templates(&all_flags) {
            assert!(spec(id).is_some(), "missing spec for {id}");
        }
        for kind in ModuleKind::ALL {
            for id in module_templates(kind, &all_flags) {
                assert!(spec(id).is_some(), "missing spec for {id}");
            }
        }
    }

    #[test]
    fn template_ids_are_unique() {
        for (i, a) in all().iter().enumerate() {
            for b in &all()[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn module_paths_are_anchored_under_the_module() {
        for template in all() {
            if !template.id.starts_with("project/") {
                assert!(
                    template.path.starts_with("{{modulePath}}/"),
                    "{} escapes its module directory",
                    template.id
                );
            }
        }
    }
}
